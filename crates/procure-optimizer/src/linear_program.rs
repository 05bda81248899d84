//! 線性規劃問題與解

use procure_core::PlanningError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 稀疏等式約束 Σ aⱼxⱼ = rhs（只存非零係數，依變數索引排序）
#[derive(Debug, Clone, PartialEq)]
pub struct Equality {
    pub terms: Vec<(usize, f64)>,
    pub rhs: f64,
}

/// 標準型線性規劃：min cᵀx，s.t. Ax = b，x ≥ 0
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearProgram {
    /// 目標函數係數
    objective: Vec<f64>,

    /// 等式約束
    equalities: Vec<Equality>,
}

impl LinearProgram {
    /// 創建最小化問題，所有變數下界為 0
    pub fn minimize(objective: Vec<f64>) -> Self {
        Self {
            objective,
            equalities: Vec::new(),
        }
    }

    /// 建構器模式：添加稠密等式約束
    pub fn with_equality(mut self, coefficients: Vec<f64>, rhs: f64) -> Self {
        self.add_equality(coefficients, rhs);
        self
    }

    /// 添加稠密等式約束，零係數不保存
    pub fn add_equality(&mut self, coefficients: Vec<f64>, rhs: f64) {
        let terms = coefficients
            .into_iter()
            .enumerate()
            .filter(|(_, a)| *a != 0.0)
            .collect();
        self.add_sparse_equality(terms, rhs);
    }

    /// 添加稀疏等式約束 `(變數索引, 係數)`
    pub fn add_sparse_equality(&mut self, mut terms: Vec<(usize, f64)>, rhs: f64) {
        terms.sort_by_key(|(j, _)| *j);
        self.equalities.push(Equality { terms, rhs });
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn equalities(&self) -> &[Equality] {
        &self.equalities
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.equalities.len()
    }

    /// 檢查變數索引在範圍內、不重複，且所有係數有限
    pub fn validate(&self) -> procure_core::Result<()> {
        let n = self.num_variables();
        if self.objective.iter().any(|c| !c.is_finite()) {
            return Err(PlanningError::InvalidInput(
                "目標函數係數必須為有限值".to_string(),
            ));
        }
        for (index, equality) in self.equalities.iter().enumerate() {
            if let Some((j, _)) = equality.terms.iter().find(|(j, _)| *j >= n) {
                return Err(PlanningError::InvalidInput(format!(
                    "第 {} 條約束的變數索引 {} 超出變數數量 {}",
                    index, j, n
                )));
            }
            if equality.terms.windows(2).any(|w| w[0].0 == w[1].0) {
                return Err(PlanningError::InvalidInput(format!(
                    "第 {} 條約束含重複的變數索引",
                    index
                )));
            }
            if !equality.rhs.is_finite() || equality.terms.iter().any(|(_, a)| !a.is_finite()) {
                return Err(PlanningError::InvalidInput(format!(
                    "第 {} 條約束含非有限值",
                    index
                )));
            }
        }
        Ok(())
    }

    /// 目標函數值 cᵀx
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, xi)| c * xi).sum()
    }
}

/// 求解狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LpStatus {
    /// 已找到最適解
    Optimal,
    /// 無可行解
    Infeasible,
    /// 目標無界
    Unbounded,
    /// 達到迭代上限
    IterationLimit,
}

impl fmt::Display for LpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Optimal => "Optimal",
            Self::Infeasible => "Infeasible",
            Self::Unbounded => "Unbounded",
            Self::IterationLimit => "IterationLimit",
        };
        f.write_str(text)
    }
}

/// 求解結果
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub status: LpStatus,

    /// 變數值（僅在 `Optimal` 時有意義）
    pub x: Vec<f64>,

    /// 目標函數值
    pub objective_value: f64,

    /// 樞軸次數（兩階段合計）
    pub iterations: usize,
}

impl LpSolution {
    /// 無解結果
    pub fn failed(status: LpStatus, iterations: usize) -> Self {
        Self {
            status,
            x: Vec::new(),
            objective_value: f64::NAN,
            iterations,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == LpStatus::Optimal
    }
}
