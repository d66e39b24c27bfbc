use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

// 分页查询参数，page 和 limit 同时接受数字和数字字符串
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationQuery {
    /// 解析为 (page, limit)，page 最小为 1，limit 限制在 [1, max_limit]
    pub fn resolve(&self) -> (u64, u64) {
        let config = &AppConfig::get().pagination;
        self.resolve_with(config.default_limit, config.max_limit)
    }

    /// page 的上限保证 page * limit 不超出 i64，偏移量计算不会溢出
    pub fn resolve_with(&self, default_limit: u64, max_limit: u64) -> (u64, u64) {
        let limit = self
            .limit
            .unwrap_or(default_limit as i64)
            .clamp(1, max_limit.max(1) as i64) as u64;
        let max_page = i64::MAX as u64 / limit;
        let page = (self.page.unwrap_or(1).max(1) as u64).min(max_page);
        (page, limit)
    }
}

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

// 软删除资源的单条查询参数
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IncludeDeletedQuery {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
}

// 自定义反序列化函数，支持字符串到i64的转换
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(Some(value as i64))
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

// 查询字符串中的布尔值，支持 true/false/1/0
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct BoolVisitor;

    impl<'de> Visitor<'de> for BoolVisitor {
        type Value = Option<bool>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or one of \"true\", \"false\", \"1\", \"0\"")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

/// 区分字段缺失与显式 null：缺失为 None，null 为 Some(None)
///
/// 需要配合 `#[serde(default)]` 使用。
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_computation() {
        let meta = PaginationMeta::new(2, 20, 45);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(3, 20, 45);
        assert!(!last.has_next);
    }

    #[test]
    fn test_meta_empty_result() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_resolve_defaults_and_clamping() {
        let query = PaginationQuery::default();
        assert_eq!(query.resolve_with(20, 100), (1, 20));

        let query = PaginationQuery {
            page: Some(-3),
            limit: Some(5000),
        };
        assert_eq!(query.resolve_with(20, 100), (1, 100));

        let query = PaginationQuery {
            page: Some(4),
            limit: Some(0),
        };
        assert_eq!(query.resolve_with(20, 100), (4, 1));
    }

    #[test]
    fn test_huge_page_is_capped() {
        let query = PaginationQuery {
            page: Some(i64::MAX),
            limit: Some(20),
        };
        let (page, limit) = query.resolve_with(20, 100);
        assert_eq!(limit, 20);
        assert!(page.checked_mul(limit).is_some_and(|n| n <= i64::MAX as u64));

        let query = PaginationQuery {
            page: Some(i64::MAX),
            limit: Some(1),
        };
        assert_eq!(query.resolve_with(20, 100).0, i64::MAX as u64);
    }

    #[test]
    fn test_accepts_numeric_strings() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page": "3", "limit": 15}"#).unwrap();
        assert_eq!(query.page, Some(3));
        assert_eq!(query.limit, Some(15));

        let bad = serde_json::from_str::<PaginationQuery>(r#"{"page": "abc"}"#);
        assert!(bad.is_err());
    }
}
