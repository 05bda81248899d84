//! 兩階段單純形法（稀疏列表格，Bland 規則）

use procure_core::SolverConfig;

use crate::linear_program::{LinearProgram, LpSolution, LpStatus};
use crate::LpSolver;

/// 單純形求解器
#[derive(Debug, Clone, Default)]
pub struct SimplexSolver {
    config: SolverConfig,
}

impl SimplexSolver {
    /// 創建新的求解器
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// 樞軸預算：配置上限，且不少於 2 × (變數數 + 約束數)
    fn pivot_budget(&self, n: usize, m: usize) -> usize {
        self.config
            .max_iterations
            .max(n.saturating_add(m).saturating_mul(2))
    }
}

impl LpSolver for SimplexSolver {
    fn solve(&self, lp: &LinearProgram) -> procure_core::Result<LpSolution> {
        lp.validate()?;

        let n = lp.num_variables();
        let budget = self.pivot_budget(n, lp.num_constraints());
        let tol = self.config.feasibility_tolerance;
        let mut tableau = Tableau::phase_one(lp);

        // Phase 1：最小化人工變數總和
        let columns = tableau.columns;
        if let Err(status) = tableau.run(columns, budget, tol) {
            return Ok(LpSolution::failed(status, tableau.iterations));
        }
        // 只以人工列的右端值衡量殘值，大目標量不會掩蓋小的負目標量
        if tableau.objective_value() > tol * tableau.artificial_scale {
            tracing::debug!(
                "Phase 1 人工變數殘值 {:.6e}，問題不可行",
                tableau.objective_value()
            );
            return Ok(LpSolution::failed(LpStatus::Infeasible, tableau.iterations));
        }

        tableau.drive_out_artificials(n, tol);

        // Phase 2：原目標，只允許原變數進基
        tableau.load_objective(lp.objective());
        let remaining = budget.saturating_sub(tableau.iterations);
        if let Err(status) = tableau.run(n, remaining, tol) {
            return Ok(LpSolution::failed(status, tableau.iterations));
        }

        let x = tableau.primal(n);
        let objective_value = lp.evaluate(&x);

        Ok(LpSolution {
            status: LpStatus::Optimal,
            x,
            objective_value,
            iterations: tableau.iterations,
        })
    }
}

/// 稀疏列：`(欄位, 係數)`，依欄位排序，不存零
type SparseRow = Vec<(usize, f64)>;

fn coefficient(row: &[(usize, f64)], column: usize) -> f64 {
    row.binary_search_by_key(&column, |(j, _)| *j)
        .map_or(0.0, |k| row[k].1)
}

/// `row - factor × pivot`，並移除樞軸欄
fn eliminate(
    row: &[(usize, f64)],
    pivot: &[(usize, f64)],
    factor: f64,
    column: usize,
) -> SparseRow {
    let mut merged = Vec::with_capacity(row.len() + pivot.len());
    let (mut a, mut b) = (0, 0);

    while a < row.len() || b < pivot.len() {
        let (j, value) = match (row.get(a), pivot.get(b)) {
            (Some(&(ja, va)), Some(&(jb, vb))) if ja == jb => {
                a += 1;
                b += 1;
                (ja, va - factor * vb)
            }
            (Some(&(ja, va)), Some(&(jb, _))) if ja < jb => {
                a += 1;
                (ja, va)
            }
            (Some(&(ja, va)), None) => {
                a += 1;
                (ja, va)
            }
            (_, Some(&(jb, vb))) => {
                b += 1;
                (jb, -factor * vb)
            }
            (None, None) => break,
        };
        if j != column && value != 0.0 {
            merged.push((j, value));
        }
    }

    merged
}

/// 單純形表格
///
/// 欄位配置：原變數 0..n，其後為人工變數。右端值另存於 `rhs`。
/// `reduced` 為縮減成本列，`reduced_rhs` 為目前目標值的相反數。
struct Tableau {
    rows: Vec<SparseRow>,
    rhs: Vec<f64>,
    reduced: Vec<f64>,
    reduced_rhs: f64,
    basis: Vec<usize>,
    columns: usize,
    /// 1 + 人工列右端值總和
    artificial_scale: f64,
    iterations: usize,
}

impl Tableau {
    fn phase_one(lp: &LinearProgram) -> Self {
        let n = lp.num_variables();
        let m = lp.num_constraints();

        let mut occurrences = vec![0usize; n];
        for equality in lp.equalities() {
            for &(j, _) in &equality.terms {
                occurrences[j] += 1;
            }
        }

        let mut rows = Vec::with_capacity(m);
        let mut rhs = Vec::with_capacity(m);
        let mut basis = Vec::with_capacity(m);
        let mut artificial_rows = Vec::new();
        let mut columns = n;

        for equality in lp.equalities() {
            // 右端值為負時整列取負，使初始基可行
            let sign = if equality.rhs < 0.0 { -1.0 } else { 1.0 };
            let mut row: SparseRow = equality.terms.iter().map(|&(j, a)| (j, sign * a)).collect();
            let mut b = sign * equality.rhs;

            // 只出現在本列且係數為正的變數直接進基，不需人工變數
            let crash = row
                .iter()
                .find(|&&(j, a)| a > 0.0 && occurrences[j] == 1)
                .copied();

            match crash {
                Some((j, a)) => {
                    if a != 1.0 {
                        for (_, value) in row.iter_mut() {
                            *value /= a;
                        }
                        b /= a;
                    }
                    basis.push(j);
                }
                None => {
                    artificial_rows.push(rows.len());
                    row.push((columns, 1.0));
                    basis.push(columns);
                    columns += 1;
                }
            }

            rows.push(row);
            rhs.push(b);
        }

        // 人工變數成本為 1，基變數縮減成本為 0
        let mut reduced = vec![0.0; columns];
        let mut reduced_rhs = 0.0;
        let mut artificial_scale = 1.0;
        for &i in &artificial_rows {
            for &(j, a) in &rows[i] {
                if j < n {
                    reduced[j] -= a;
                }
            }
            reduced_rhs -= rhs[i];
            artificial_scale += rhs[i];
        }

        Self {
            rows,
            rhs,
            reduced,
            reduced_rhs,
            basis,
            columns,
            artificial_scale,
            iterations: 0,
        }
    }

    fn objective_value(&self) -> f64 {
        -self.reduced_rhs
    }

    /// 執行單純形迭代，`allowed` 之前的欄位可進基
    fn run(&mut self, allowed: usize, max_iterations: usize, tol: f64) -> Result<(), LpStatus> {
        let mut budget = max_iterations;
        loop {
            // Bland：取最小索引的負縮減成本欄
            let Some(entering) = (0..allowed).find(|&j| self.reduced[j] < -tol) else {
                return Ok(());
            };

            let mut leaving: Option<(usize, f64)> = None;
            for (i, row) in self.rows.iter().enumerate() {
                let a = coefficient(row, entering);
                if a > tol {
                    let ratio = self.rhs[i] / a;
                    let better = match leaving {
                        None => true,
                        Some((best, best_ratio)) => {
                            ratio < best_ratio
                                || (ratio == best_ratio && self.basis[i] < self.basis[best])
                        }
                    };
                    if better {
                        leaving = Some((i, ratio));
                    }
                }
            }

            let Some((pivot_row, _)) = leaving else {
                return Err(LpStatus::Unbounded);
            };

            if budget == 0 {
                return Err(LpStatus::IterationLimit);
            }
            budget -= 1;

            self.pivot(pivot_row, entering);
        }
    }

    fn pivot(&mut self, pivot_row: usize, column: usize) {
        let pivot = coefficient(&self.rows[pivot_row], column);
        if pivot != 1.0 {
            for (_, value) in self.rows[pivot_row].iter_mut() {
                *value /= pivot;
            }
            self.rhs[pivot_row] /= pivot;
        }
        let pivot_values = self.rows[pivot_row].clone();
        let pivot_rhs = self.rhs[pivot_row];

        for i in 0..self.rows.len() {
            if i == pivot_row {
                continue;
            }
            let factor = coefficient(&self.rows[i], column);
            if factor != 0.0 {
                self.rows[i] = eliminate(&self.rows[i], &pivot_values, factor, column);
                self.rhs[i] -= factor * pivot_rhs;
            }
        }

        let factor = self.reduced[column];
        if factor != 0.0 {
            for &(j, a) in &pivot_values {
                self.reduced[j] -= factor * a;
            }
            self.reduced_rhs -= factor * pivot_rhs;
            self.reduced[column] = 0.0;
        }

        self.basis[pivot_row] = column;
        self.iterations += 1;
    }

    /// 將殘留在基中的人工變數換出；換不出的列為冗餘約束，直接移除
    fn drive_out_artificials(&mut self, n: usize, tol: f64) {
        let mut i = 0;
        while i < self.rows.len() {
            if self.basis[i] < n {
                i += 1;
                continue;
            }
            let entry = self.rows[i]
                .iter()
                .find(|&&(j, a)| j < n && a.abs() > tol)
                .map(|&(j, _)| j);
            match entry {
                Some(column) => {
                    self.pivot(i, column);
                    i += 1;
                }
                None => {
                    self.rows.remove(i);
                    self.rhs.remove(i);
                    self.basis.remove(i);
                }
            }
        }
    }

    /// 以原目標重算縮減成本列
    fn load_objective(&mut self, costs: &[f64]) {
        let mut reduced = vec![0.0; self.columns];
        reduced[..costs.len()].copy_from_slice(costs);
        let mut reduced_rhs = 0.0;

        for ((row, &basic), &b) in self.rows.iter().zip(&self.basis).zip(&self.rhs) {
            let cost = costs.get(basic).copied().unwrap_or(0.0);
            if cost != 0.0 {
                for &(j, a) in row {
                    reduced[j] -= cost * a;
                }
                reduced_rhs -= cost * b;
            }
        }
        for &basic in &self.basis {
            reduced[basic] = 0.0;
        }

        self.reduced = reduced;
        self.reduced_rhs = reduced_rhs;
    }

    fn primal(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.0; n];
        for (&basic, &b) in self.basis.iter().zip(&self.rhs) {
            if basic < n {
                x[basic] = b;
            }
        }
        x
    }
}
