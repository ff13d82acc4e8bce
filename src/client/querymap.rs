use crate::utils::urlencode;

/// Ordered query parameters of an S3 request.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct QueryMap(Vec<(String, String)>);

impl QueryMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.push((key, value))
    }

    pub fn merge(&mut self, querys: Self) {
        self.0.extend(querys.0);
    }

    /// Merge a raw query string like `uploads` or `a=1&b=2`.
    pub fn merge_str(&mut self, query_str: &str) {
        for query in query_str.split('&').filter(|x| !x.is_empty()) {
            let (k, v) = query.split_once('=').unwrap_or((query, ""));
            self.insert(k.to_string(), v.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// get query string.
    /// the empty keys will be skipped.
    /// key and value will be uri encode.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| {
                let k = urlencode(k, false);
                if v.is_empty() {
                    k
                } else {
                    format!("{k}={}", urlencode(v, false))
                }
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

impl From<QueryMap> for String {
    fn from(querys: QueryMap) -> Self {
        querys.to_query_string()
    }
}
