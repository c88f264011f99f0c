use std::fmt;

pub fn display_fn<F>(f: F) -> impl fmt::Display
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    struct DisplayFn<F> {
        f: F,
    }
    impl<F> fmt::Display for DisplayFn<F>
    where
        F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
    {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.f)(formatter)
        }
    }
    DisplayFn { f }
}

/// Check whether the string can be used as a label or an exported name.
pub fn verify_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => (),
        // The identifier must be started with XID-Start.
        _ => return false,
    }
    if s == "_" {
        return false;
    }
    chars.all(unicode_ident::is_xid_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_ident() {
        assert!(verify_ident("ID"));
        assert!(verify_ident("DIV_I"));
        assert!(verify_ident("_private"));
        assert!(verify_ident("ｔｒｕｅ"));
        assert!(!verify_ident(""));
        assert!(!verify_ident("_"));
        assert!(!verify_ident("1st"));
        assert!(!verify_ident("a-b"));
        assert!(!verify_ident("$"));
    }

    #[test]
    fn test_display_fn() {
        let d = display_fn(|f| write!(f, "{}-{}", 1, 2));
        assert_eq!(d.to_string(), "1-2");
    }
}
