//! 供應商條件模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商條件（每物料一筆有效條件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierTerm {
    /// 物料ID
    pub material_id: String,

    /// 供應商
    pub supplier: Option<String>,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 單價
    pub unit_price: Decimal,
}

impl SupplierTerm {
    /// 創建新的供應商條件
    pub fn new(material_id: impl Into<String>, lead_time_days: u32, unit_price: Decimal) -> Self {
        Self {
            material_id: material_id.into(),
            supplier: None,
            lead_time_days,
            unit_price,
        }
    }

    /// 建構器模式：設置供應商
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// 驗證單價為正
    ///
    /// 提前期為 0 不在此處拒絕，由分配階段回報 `InvalidLeadTime`。
    pub fn validate(&self) -> crate::Result<()> {
        if self.unit_price <= Decimal::ZERO {
            return Err(crate::PlanningError::InvalidMaterialData {
                material_id: self.material_id.clone(),
                detail: format!("單價必須為正: {}", self.unit_price),
            });
        }
        Ok(())
    }
}
