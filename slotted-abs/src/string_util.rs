/*!

Small string utilities: joining the items of an iterator with a separator.

*/

use std::fmt::Display;

/// Joins the items of an iterator into a `String`, separating consecutive items with `sep`.
pub fn join_string<I>(iter: I, sep: &str) -> String
  where I: IntoIterator,
        I::Item: Display
{
  let mut out = String::new();
  for (i, item) in iter.into_iter().enumerate() {
    if i > 0 {
      out.push_str(sep);
    }
    out.push_str(&item.to_string());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn joins_with_separator() {
    assert_eq!(join_string([1, 2, 3], ", "), "1, 2, 3");
    assert_eq!(join_string(Vec::<u32>::new(), ", "), "");
    assert_eq!(join_string(["solo"], ", "), "solo");
  }
}
