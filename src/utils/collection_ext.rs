//! 集合扩展工具模块
//!
//! 提供常用的集合处理辅助函数

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// 将 Vec 转换为 HashMap，使用指定的 key 提取函数
///
/// # Example
/// ```ignore
/// let metrics: Vec<Metric> = ...;
/// let metric_map = vec_to_map(metrics, |m| m.id);
/// ```
#[inline]
pub fn vec_to_map<T, K, F>(items: Vec<T>, key_fn: F) -> HashMap<K, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    items.into_iter().map(|item| (key_fn(&item), item)).collect()
}

/// 去重并保持顺序
///
/// # Example
/// ```ignore
/// let ids = vec![1, 2, 1, 3, 2];
/// let unique = unique_ordered(ids); // [1, 2, 3]
/// ```
#[inline]
pub fn unique_ordered<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// 判断两个列表是否互为排列（元素相同、数量相同，顺序不限）
pub fn is_permutation<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut counts: HashMap<&T, i64> = HashMap::new();
    for item in left {
        *counts.entry(item).or_default() += 1;
    }
    for item in right {
        *counts.entry(item).or_default() -= 1;
    }
    counts.values().all(|c| *c == 0)
}
