//! 物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 物料（單次計劃的參考資料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// 物料ID（唯一鍵）
    pub id: String,

    /// 料號
    pub sku: Option<String>,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 再訂購點
    pub reorder_level: Decimal,
}

impl Material {
    /// 創建新的物料
    pub fn new(id: impl Into<String>, current_stock: Decimal, reorder_level: Decimal) -> Self {
        Self {
            id: id.into(),
            sku: None,
            current_stock,
            reorder_level,
        }
    }

    /// 建構器模式：設置料號
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// 檢查現有庫存是否低於再訂購點
    pub fn is_below_reorder_level(&self) -> bool {
        self.current_stock < self.reorder_level
    }

    /// 驗證庫存數量不為負
    pub fn validate(&self) -> crate::Result<()> {
        if self.id.trim().is_empty() {
            return Err(crate::PlanningError::InvalidInput("物料ID不可為空".to_string()));
        }
        if self.current_stock < Decimal::ZERO || self.reorder_level < Decimal::ZERO {
            return Err(crate::PlanningError::InvalidMaterialData {
                material_id: self.id.clone(),
                detail: format!(
                    "庫存或再訂購點為負：庫存 {}, 再訂購點 {}",
                    self.current_stock, self.reorder_level
                ),
            });
        }
        Ok(())
    }
}
