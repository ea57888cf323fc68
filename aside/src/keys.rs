use uuid::Uuid;

/// Derives a stable record key from two identifying strings, such as a
/// restaurant and a user, so per-pair records need no lookup table.
pub trait KeyDeriver: Send + Sync {
  fn derive_key(&self, a: &str, b: &str) -> String;
}

/// Name-based (SHA-1, version 5) UUID over `a` followed by `b`, in the nil
/// namespace, rendered as lowercase hyphenated text.
///
/// The two inputs are concatenated without a separator, so `("ab", "c")` and
/// `("a", "bc")` share a key. Existing stores are keyed this way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidKeyDeriver;

impl KeyDeriver for UuidKeyDeriver {
  fn derive_key(&self, a: &str, b: &str) -> String {
    let mut name = String::with_capacity(a.len() + b.len());
    name.push_str(a);
    name.push_str(b);
    Uuid::new_v5(&Uuid::nil(), name.as_bytes()).to_string()
  }
}

impl<F> KeyDeriver for F
where
  F: Fn(&str, &str) -> String + Send + Sync,
{
  fn derive_key(&self, a: &str, b: &str) -> String {
    self(a, b)
  }
}
