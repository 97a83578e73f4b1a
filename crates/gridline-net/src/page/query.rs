//! Query parameters for a single page request.

use std::collections::BTreeMap;

/// Names of the query-string keys used for paging and sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParamNames {
    /// Key carrying the 1-based page index.
    pub page: String,
    /// Key carrying the page size.
    pub page_size: String,
    /// Key carrying the sort column (`-` prefix for descending).
    pub sort: String,
}

impl Default for QueryParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            page_size: "pageSize".to_string(),
            sort: "orderBy".to_string(),
        }
    }
}

/// The sort part of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParam {
    /// Column name (dotted path) to sort by.
    pub column: String,
    /// Whether the order is descending.
    pub descending: bool,
}

impl SortParam {
    /// Encode as `column` or `-column`.
    pub fn encode(&self) -> String {
        if self.descending {
            format!("-{}", self.column)
        } else {
            self.column.clone()
        }
    }

    /// Decode `column` / `-column`. Returns `None` for an empty column.
    pub fn decode(value: &str) -> Option<Self> {
        let (column, descending) = match value.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (value, false),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_string(),
            descending,
        })
    }
}

/// Everything needed to request one page from a remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page index.
    pub page: usize,
    /// Rows per page; `None` requests everything and omits the parameter.
    pub page_size: Option<usize>,
    /// Active sort, if any.
    pub sort: Option<SortParam>,
    /// Filter and caller-supplied parameters, sent verbatim.
    pub params: BTreeMap<String, String>,
    /// Key names for page, page size and sort.
    pub names: QueryParamNames,
}

impl PageQuery {
    /// A query for `page` with default key names and nothing else set.
    pub fn new(page: usize) -> Self {
        Self {
            page,
            page_size: None,
            sort: None,
            params: BTreeMap::new(),
            names: QueryParamNames::default(),
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the sort column and direction.
    pub fn with_sort(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.sort = Some(SortParam {
            column: column.into(),
            descending,
        });
        self
    }

    /// Add an extra parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Flatten into ordered query pairs: page, page size, sort, then the
    /// remaining parameters by key.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3 + self.params.len());
        pairs.push((self.names.page.clone(), self.page.to_string()));
        if let Some(size) = self.page_size {
            pairs.push((self.names.page_size.clone(), size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push((self.names.sort.clone(), sort.encode()));
        }
        pairs.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }

    /// `endpoint` with this query appended to any query it already has.
    pub fn request_url(&self, endpoint: &url::Url) -> url::Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(self.to_pairs());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let endpoint = url::Url::parse("http://localhost/people?tenant=acme").unwrap();
        let url = PageQuery::new(2).with_sort("name", true).request_url(&endpoint);
        assert_eq!(url.as_str(), "http://localhost/people?tenant=acme&page=2&orderBy=-name");
    }

    #[test]
    fn test_default_pairs() {
        let query = PageQuery::new(3).with_page_size(20);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "3".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_unbounded_page_size_is_omitted() {
        let query = PageQuery::new(1).with_sort("name", false);
        let keys: Vec<_> = query.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "orderBy"]);
    }

    #[test]
    fn test_descending_sort_prefix() {
        let query = PageQuery::new(1).with_sort("country.name", true);
        let pairs = query.to_pairs();
        assert_eq!(pairs[1], ("orderBy".to_string(), "-country.name".to_string()));
    }

    #[test]
    fn test_custom_names_and_params() {
        let mut query = PageQuery::new(2)
            .with_page_size(50)
            .with_sort("id", false)
            .with_param("telephone", "+78")
            .with_param("apiKey", "k");
        query.names = QueryParamNames {
            page: "p".into(),
            page_size: "limit".into(),
            sort: "sort".into(),
        };

        assert_eq!(
            query.to_pairs(),
            vec![
                ("p".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("sort".to_string(), "id".to_string()),
                ("apiKey".to_string(), "k".to_string()),
                ("telephone".to_string(), "+78".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_param_decode() {
        assert_eq!(
            SortParam::decode("-name"),
            Some(SortParam {
                column: "name".into(),
                descending: true
            })
        );
        assert_eq!(SortParam::decode("name").map(|s| s.descending), Some(false));
        assert_eq!(SortParam::decode("-"), None);
        assert_eq!(SortParam::decode(""), None);
    }
}
