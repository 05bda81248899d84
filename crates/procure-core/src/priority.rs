//! 計劃優先權重

use serde::{Deserialize, Serialize};

use crate::PlanningError;

/// 優先項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityKind {
    /// 價格
    Pricing,
    /// 提前期
    LeadTime,
    /// 安全庫存
    SafetyStock,
    /// 在地供應商（目前未納入成本）
    LocalSupplier,
    /// 海外供應商（目前未納入成本）
    GlobalSupplier,
}

impl PriorityKind {
    pub const ALL: [PriorityKind; 5] = [
        Self::Pricing,
        Self::LeadTime,
        Self::SafetyStock,
        Self::LocalSupplier,
        Self::GlobalSupplier,
    ];

    /// 顯示名稱
    pub fn name(self) -> &'static str {
        match self {
            Self::Pricing => "Pricing",
            Self::LeadTime => "Lead Time",
            Self::SafetyStock => "Safety Stock",
            Self::LocalSupplier => "Local Supplier",
            Self::GlobalSupplier => "Global Supplier",
        }
    }

    /// 由顯示名稱解析
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// 計劃優先權重（每項 0.0 ~ 1.0，不做總和正規化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanningPriorities {
    pub pricing: f64,
    pub lead_time: f64,
    pub safety_stock: f64,
    pub local_supplier: f64,
    pub global_supplier: f64,
}

impl PlanningPriorities {
    /// 創建權重並檢查範圍
    pub fn new(
        pricing: f64,
        lead_time: f64,
        safety_stock: f64,
        local_supplier: f64,
        global_supplier: f64,
    ) -> crate::Result<Self> {
        let priorities = Self {
            pricing,
            lead_time,
            safety_stock,
            local_supplier,
            global_supplier,
        };
        priorities.validate()?;
        Ok(priorities)
    }

    /// 由（名稱, 權重）映射建立；未提供的項目取預設值
    pub fn from_named<'a, I>(weights: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut priorities = Self::default();
        for (name, weight) in weights {
            let kind = PriorityKind::from_name(name).ok_or_else(|| {
                PlanningError::InvalidInput(format!("未知的優先項目: {}", name))
            })?;
            priorities.set(kind, weight);
        }
        priorities.validate()?;
        Ok(priorities)
    }

    pub fn get(&self, kind: PriorityKind) -> f64 {
        match kind {
            PriorityKind::Pricing => self.pricing,
            PriorityKind::LeadTime => self.lead_time,
            PriorityKind::SafetyStock => self.safety_stock,
            PriorityKind::LocalSupplier => self.local_supplier,
            PriorityKind::GlobalSupplier => self.global_supplier,
        }
    }

    pub fn set(&mut self, kind: PriorityKind, weight: f64) {
        match kind {
            PriorityKind::Pricing => self.pricing = weight,
            PriorityKind::LeadTime => self.lead_time = weight,
            PriorityKind::SafetyStock => self.safety_stock = weight,
            PriorityKind::LocalSupplier => self.local_supplier = weight,
            PriorityKind::GlobalSupplier => self.global_supplier = weight,
        }
    }

    /// 檢查每項權重介於 0 與 1 之間
    pub fn validate(&self) -> crate::Result<()> {
        for kind in PriorityKind::ALL {
            let weight = self.get(kind);
            if !(0.0..=1.0).contains(&weight) {
                return Err(PlanningError::InvalidInput(format!(
                    "優先權重 {} 超出範圍 [0, 1]: {}",
                    kind.name(),
                    weight
                )));
            }
        }
        Ok(())
    }
}

impl Default for PlanningPriorities {
    fn default() -> Self {
        Self {
            pricing: 0.3,
            lead_time: 0.3,
            safety_stock: 0.2,
            local_supplier: 0.1,
            global_supplier: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_weights() {
        let priorities = PlanningPriorities::default();
        assert_eq!(priorities.get(PriorityKind::Pricing), 0.3);
        assert_eq!(priorities.get(PriorityKind::SafetyStock), 0.2);
        assert!(priorities.validate().is_ok());
    }

    #[test]
    fn test_from_named() {
        let priorities =
            PlanningPriorities::from_named([("Pricing", 1.0), ("Lead Time", 0.0)]).unwrap();

        assert_eq!(priorities.pricing, 1.0);
        assert_eq!(priorities.lead_time, 0.0);
        // 未提供者保留預設
        assert_eq!(priorities.safety_stock, 0.2);
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!(PlanningPriorities::from_named([("Freight", 0.5)]).is_err());
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn test_out_of_range_rejected(#[case] weight: f64) {
        assert!(PlanningPriorities::new(weight, 0.3, 0.2, 0.1, 0.1).is_err());
    }

    #[test]
    fn test_name_roundtrip() {
        for kind in PriorityKind::ALL {
            assert_eq!(PriorityKind::from_name(kind.name()), Some(kind));
        }
    }
}
