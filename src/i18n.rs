// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）; 不支持的语言回退为 "en"
pub fn set_locale(locale: &str) {
    let supported = rust_i18n::available_locales!();
    if supported.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale = %locale, "不支持的语言,回退为 en");
        rust_i18n::set_locale("en");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use exam_results_dashboard::i18n::t;
/// let msg = t("summary.pass_rate");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use exam_results_dashboard::i18n::t_with_args;
/// let msg = t_with_args("error.file_not_found", &[("path", "/tmp/results.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 测试辅助: rust-i18n 的 locale 为全局状态,相关测试需串行
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_unsupported_locale_falls_back() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("fr");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("summary.pass_rate"), "Pass Rate");

        set_locale("zh-CN");
        assert_eq!(t("summary.pass_rate"), "及格率");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args(
            "status.loaded",
            &[("file", "results.xlsx"), ("count", "2")],
        );
        assert_eq!(msg, "Successfully loaded: results.xlsx (2 students)");
    }
}
