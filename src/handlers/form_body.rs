//! URL-encoded bodies with repeated and indexed keys, which `web::Form`
//! cannot express (`selected_customers` repeats, customer rows are
//! `customer_name_0`, `customer_phone_0`, ...).

/// Decode a URL-encoded component: `+` → space, `%HH` → byte.
fn url_decode(s: &str) -> String {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < b.len() => {
                let hex = std::str::from_utf8(&b[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    pub fn parse(body: &str) -> Self {
        let pairs = body
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (url_decode(k), url_decode(v)),
                None => (url_decode(pair), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`, or "" when absent.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Collect `(index, name, phone)` rows from `{name_prefix}{i}` and
    /// `{phone_prefix}{i}` keys, ordered by index. Indices at or above
    /// `max_rows` are skipped.
    pub fn indexed_rows(&self, name_prefix: &str, phone_prefix: &str, max_rows: usize) -> Vec<(usize, String, String)> {
        let mut rows: Vec<(usize, String, String)> = Vec::new();
        for (key, value) in &self.pairs {
            let (index, is_name) = if let Some(i) = key.strip_prefix(name_prefix) {
                (i, true)
            } else if let Some(i) = key.strip_prefix(phone_prefix) {
                (i, false)
            } else {
                continue;
            };
            let Ok(index) = index.parse::<usize>() else {
                continue;
            };
            if index >= max_rows {
                continue;
            }
            let pos = match rows.iter().position(|(i, _, _)| *i == index) {
                Some(pos) => pos,
                None => {
                    rows.push((index, String::new(), String::new()));
                    rows.len() - 1
                }
            };
            if is_name {
                rows[pos].1 = value.clone();
            } else {
                rows[pos].2 = value.clone();
            }
        }
        rows.sort_by_key(|(i, _, _)| *i);
        rows
    }
}
