//! Nelder–Mead 單純形搜尋（無導數最小化）

/// 搜尋結果
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// 最佳點
    pub point: Vec<f64>,
    /// 最佳目標值
    pub value: f64,
    /// 迭代次數
    pub iterations: usize,
    /// 是否在迭代上限內收斂
    pub converged: bool,
}

/// Nelder–Mead 最小化器
#[derive(Debug, Clone, Copy)]
pub struct NelderMead {
    max_iterations: usize,
    tolerance: f64,
}

// 標準係數：反射、擴張、收縮、縮小
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

impl NelderMead {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// 從 `start` 開始最小化 `objective`
    ///
    /// 初始單純形：每個維度偏移 5%（為 0 時偏移 0.00025）。
    /// 非有限的目標值視為 +∞。
    pub fn minimize<F>(&self, mut objective: F, start: &[f64]) -> Minimum
    where
        F: FnMut(&[f64]) -> f64,
    {
        let dim = start.len();
        let mut eval = |x: &[f64]| {
            let value = objective(x);
            if value.is_finite() {
                value
            } else {
                f64::INFINITY
            }
        };

        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
        simplex.push((start.to_vec(), eval(start)));
        for i in 0..dim {
            let mut vertex = start.to_vec();
            vertex[i] = if vertex[i] != 0.0 {
                vertex[i] * 1.05
            } else {
                0.00025
            };
            let value = eval(&vertex);
            simplex.push((vertex, value));
        }

        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

            let best = simplex[0].1;
            let worst = simplex[dim].1;
            if best.is_finite() && worst - best <= self.tolerance * (1.0 + best.abs()) {
                converged = true;
                break;
            }

            iterations += 1;

            let centroid = centroid(&simplex[..dim], dim);
            let reflected = blend(&centroid, &simplex[dim].0, -REFLECTION);
            let f_reflected = eval(&reflected);

            if f_reflected < simplex[0].1 {
                let expanded = blend(&centroid, &simplex[dim].0, -REFLECTION * EXPANSION);
                let f_expanded = eval(&expanded);
                simplex[dim] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
                continue;
            }

            if f_reflected < simplex[dim - 1].1 {
                simplex[dim] = (reflected, f_reflected);
                continue;
            }

            // 收縮：外側或內側
            let (contracted, f_contracted) = if f_reflected < simplex[dim].1 {
                let point = blend(&centroid, &simplex[dim].0, -REFLECTION * CONTRACTION);
                let value = eval(&point);
                (point, value)
            } else {
                let point = blend(&centroid, &simplex[dim].0, CONTRACTION);
                let value = eval(&point);
                (point, value)
            };

            if f_contracted < simplex[dim].1.min(f_reflected) {
                simplex[dim] = (contracted, f_contracted);
                continue;
            }

            // 向最佳點縮小
            let best_point = simplex[0].0.clone();
            for vertex in simplex.iter_mut().skip(1) {
                let point: Vec<f64> = best_point
                    .iter()
                    .zip(&vertex.0)
                    .map(|(b, v)| b + SHRINK * (v - b))
                    .collect();
                let value = eval(&point);
                *vertex = (point, value);
            }
        }

        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (point, value) = simplex.swap_remove(0);

        Minimum {
            point,
            value,
            iterations,
            converged,
        }
    }
}

/// 除最差點外各點的重心
fn centroid(vertices: &[(Vec<f64>, f64)], dim: usize) -> Vec<f64> {
    let mut c = vec![0.0; dim];
    for (point, _) in vertices {
        for (ci, xi) in c.iter_mut().zip(point) {
            *ci += xi;
        }
    }
    let n = vertices.len() as f64;
    c.iter_mut().for_each(|ci| *ci /= n);
    c
}

/// centroid + t × (worst − centroid)
fn blend(centroid: &[f64], worst: &[f64], t: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(worst)
        .map(|(c, w)| c + t * (w - c))
        .collect()
}
