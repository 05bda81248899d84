//! 需求歷史模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::PeriodGranularity;
use crate::PlanningError;

/// 單期需求觀測值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandObservation {
    /// 期間（期初日期）
    pub period: NaiveDate,

    /// 需求數量
    pub quantity: f64,
}

impl DemandObservation {
    pub fn new(period: NaiveDate, quantity: f64) -> Self {
        Self { period, quantity }
    }
}

/// 物料需求歷史序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    /// 物料ID
    pub material_id: String,

    /// 期間粒度
    pub granularity: PeriodGranularity,

    /// 觀測值（依時間排序）
    pub observations: Vec<DemandObservation>,
}

impl DemandSeries {
    /// 創建新的需求序列（預設每月）
    pub fn new(material_id: impl Into<String>, observations: Vec<DemandObservation>) -> Self {
        Self {
            material_id: material_id.into(),
            granularity: PeriodGranularity::Monthly,
            observations,
        }
    }

    /// 從起始期間與連續數量建立序列
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use procure_core::{DemandSeries, PeriodGranularity};
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let series = DemandSeries::from_quantities(
    ///     "Steel Rods",
    ///     start,
    ///     PeriodGranularity::Monthly,
    ///     &[450.0, 480.0, 520.0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(series.len(), 3);
    /// assert_eq!(series.last_period(), NaiveDate::from_ymd_opt(2025, 3, 1));
    /// ```
    pub fn from_quantities(
        material_id: impl Into<String>,
        start: NaiveDate,
        granularity: PeriodGranularity,
        quantities: &[f64],
    ) -> crate::Result<Self> {
        let material_id = material_id.into();
        let mut observations = Vec::with_capacity(quantities.len());

        for (step, &quantity) in quantities.iter().enumerate() {
            let period = u32::try_from(step)
                .ok()
                .and_then(|s| granularity.advance(start, s))
                .ok_or_else(|| PlanningError::InvalidMaterialData {
                    material_id: material_id.clone(),
                    detail: "期間日期溢出".to_string(),
                })?;
            observations.push(DemandObservation::new(period, quantity));
        }

        Ok(Self {
            material_id,
            granularity,
            observations,
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 需求數量（依時間排序）
    pub fn quantities(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.quantity).collect()
    }

    /// 最後一個歷史期間
    pub fn last_period(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.period)
    }

    /// 緊接最後歷史期間之後的 `horizon` 個期間
    ///
    /// 與驗證相同，一律由首期推算：1/31 起始的月序列會落在各月月底，
    /// 而不是沿著 2/28 之後的日期往下推。
    pub fn forecast_periods(&self, horizon: usize) -> Option<Vec<NaiveDate>> {
        let first = self.observations.first()?.period;
        let offset = self.observations.len() - 1;
        (1..=horizon)
            .map(|h| {
                u32::try_from(offset + h)
                    .ok()
                    .and_then(|step| self.granularity.advance(first, step))
            })
            .collect()
    }

    /// 驗證序列：數量非負且有限、期間連續無缺口
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(obs) = self
            .observations
            .iter()
            .find(|o| !o.quantity.is_finite() || o.quantity < 0.0)
        {
            return Err(PlanningError::InvalidMaterialData {
                material_id: self.material_id.clone(),
                detail: format!("{} 的需求數量無效: {}", obs.period, obs.quantity),
            });
        }

        let Some(first) = self.observations.first() else {
            return Ok(());
        };

        // 以首期推算，避免月底日期逐期縮短
        for (step, obs) in self.observations.iter().enumerate().skip(1) {
            let expected = u32::try_from(step)
                .ok()
                .and_then(|s| self.granularity.advance(first.period, s));
            if expected != Some(obs.period) {
                return Err(PlanningError::InvalidMaterialData {
                    material_id: self.material_id.clone(),
                    detail: format!("需求期間不連續或未排序: 第 {} 期為 {}", step + 1, obs.period),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, 1).unwrap()
    }

    #[test]
    fn test_create_series() {
        let series = DemandSeries::new(
            "Steel Rods",
            vec![
                DemandObservation::new(month(1), 450.0),
                DemandObservation::new(month(2), 480.0),
                DemandObservation::new(month(3), 520.0),
            ],
        );

        assert_eq!(series.material_id, "Steel Rods");
        assert_eq!(series.granularity, PeriodGranularity::Monthly);
        assert_eq!(series.quantities(), vec![450.0, 480.0, 520.0]);
        assert_eq!(series.last_period(), Some(month(3)));
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_gap_rejected() {
        let series = DemandSeries::new(
            "Brass Blocks",
            vec![
                DemandObservation::new(month(1), 100.0),
                DemandObservation::new(month(3), 110.0),
            ],
        );

        assert!(matches!(
            series.validate(),
            Err(PlanningError::InvalidMaterialData { ref material_id, .. })
                if material_id == "Brass Blocks"
        ));
    }

    #[test]
    fn test_unordered_rejected() {
        let series = DemandSeries::new(
            "Brass Blocks",
            vec![
                DemandObservation::new(month(2), 100.0),
                DemandObservation::new(month(1), 110.0),
            ],
        );

        assert!(series.validate().is_err());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let series = DemandSeries::new(
            "Cutting Fluids",
            vec![
                DemandObservation::new(month(1), 40.0),
                DemandObservation::new(month(2), -5.0),
            ],
        );

        assert!(series.validate().is_err());
    }

    #[test]
    fn test_weekly_from_quantities() {
        let start = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let series = DemandSeries::from_quantities(
            "Aluminum Sheets",
            start,
            PeriodGranularity::Weekly,
            &[150.0, 170.0, 200.0],
        )
        .unwrap();

        assert_eq!(series.last_period(), NaiveDate::from_ymd_opt(2025, 10, 20));
        assert!(series.validate().is_ok());
        assert_eq!(
            series.forecast_periods(2),
            Some(vec![
                NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
                NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            ])
        );
    }

    #[test]
    fn test_month_end_forecast_periods_anchor_on_first() {
        let jan_end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let series = DemandSeries::new(
            "Steel Rods",
            vec![
                DemandObservation::new(jan_end, 450.0),
                DemandObservation::new(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(), 480.0),
            ],
        );
        assert!(series.validate().is_ok());

        assert_eq!(
            series.forecast_periods(2),
            Some(vec![
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            ])
        );
    }

    #[test]
    fn test_forecast_periods_empty_series() {
        let series = DemandSeries::new("Steel Rods", Vec::new());
        assert_eq!(series.forecast_periods(3), None);
    }
}
