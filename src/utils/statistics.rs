//! 描述性统计

use crate::models::dashboard::responses::DescriptiveStats;
use crate::utils::grading::round2;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// 样本方差（n - 1），少于两个值时为 None
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// 线性插值分位数，sorted 必须已升序
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let variance = sample_variance(&sorted);

    Some(DescriptiveStats {
        count: sorted.len() as i64,
        mean: round2(mean(&sorted)?),
        std: variance.map(|v| round2(v.sqrt())),
        variance: variance.map(round2),
        min: round2(min),
        q1: round2(quantile(&sorted, 0.25)?),
        median: round2(quantile(&sorted, 0.5)?),
        q3: round2(quantile(&sorted, 0.75)?),
        max: round2(max),
        range: round2(max - min),
    })
}

/// 皮尔逊相关系数；长度不一致、少于两个点或方差为 0 时为 None
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}

/// 百分位排名：严格低于 value 的样本占比 ×100
pub fn percentile_rank(value: f64, population: &[f64]) -> Option<f64> {
    if population.is_empty() {
        return None;
    }
    let lower = population.iter().filter(|v| **v < value).count();
    Some(round2(lower as f64 / population.len() as f64 * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let stats = describe(&[60.0, 70.0, 80.0, 90.0]).expect("stats");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 75.0);
        assert_eq!(stats.min, 60.0);
        assert_eq!(stats.max, 90.0);
        assert_eq!(stats.range, 30.0);
        assert_eq!(stats.median, 75.0);
        assert_eq!(stats.q1, 67.5);
        assert_eq!(stats.q3, 82.5);
        // 样本方差 500/3
        assert_eq!(stats.variance, Some(166.67));
        assert_eq!(stats.std, Some(12.91));
    }

    #[test]
    fn test_describe_edge_cases() {
        assert!(describe(&[]).is_none());
        let single = describe(&[42.0]).expect("stats");
        assert_eq!(single.count, 1);
        assert_eq!(single.median, 42.0);
        assert_eq!(single.std, None);
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let r = pearson(&xs, &ys).expect("r");
        assert!((r - 1.0).abs() < 1e-9);

        let inverse = [8.0, 6.0, 4.0, 2.0];
        let r = pearson(&xs, &inverse).expect("r");
        assert!((r + 1.0).abs() < 1e-9);

        assert_eq!(pearson(&xs, &[5.0, 5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
    }

    #[test]
    fn test_percentile_rank() {
        let population = [50.0, 60.0, 70.0, 80.0];
        assert_eq!(percentile_rank(50.0, &population), Some(0.0));
        assert_eq!(percentile_rank(70.0, &population), Some(50.0));
        assert_eq!(percentile_rank(80.0, &population), Some(75.0));
        assert_eq!(percentile_rank(80.0, &[]), None);
    }
}
