/// A macro version of [Option::unwrap_or_else] that allows `return`,
/// `break` and `continue` in the fallback branch.
///
/// ```ignore
/// let item = unwrap_or!(candidates.next(); continue);
/// ```
///
/// Keep the fallback short, the jump is easy to miss without an `if`.
macro_rules! unwrap_or {
  ($m:expr; $fail:expr) => {{
    if let Some(res) = ($m) { res } else { $fail }
  }};
}

pub(crate) use unwrap_or;
