pub const FALLBACK_LOCALE: &str = "en-US";

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Language tag for the current process, read at call time.
pub fn default_locale() -> String {
    default_locale_with(|name| std::env::var(name).ok())
}

/// First usable locale among `LC_ALL`, `LC_MESSAGES` and `LANG` as looked up
/// through `env`; `C`/`POSIX` values are skipped.
pub fn default_locale_with(env: impl Fn(&str) -> Option<String>) -> String {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| env(*name))
        .find_map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

/// Turns a POSIX locale (`pt_BR.UTF-8`) into a language tag (`pt-BR`).
///
/// Returns `None` for the `C`/`POSIX` locales and anything without a
/// plausible language subtag.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw.trim().split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }

    let mut parts = base.split(['_', '-']);
    let language = parts.next()?.to_ascii_lowercase();
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    match parts.next() {
        Some(region) if !region.is_empty() => {
            Some(format!("{language}-{}", region.to_ascii_uppercase()))
        }
        _ => Some(language),
    }
}
