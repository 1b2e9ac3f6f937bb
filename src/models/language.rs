/// 根据 LeetCode 语言标识得到代码文件扩展名
///
/// 未知语言直接使用标识本身（小写、只保留字母数字），空标识使用 `txt`
pub fn file_extension(lang: &str) -> String {
    let lang = lang.trim().to_ascii_lowercase();
    let known = match lang.as_str() {
        "c" => "c",
        "cpp" | "c++" => "cpp",
        "csharp" | "c#" => "cs",
        "java" => "java",
        "python" | "python3" | "pythondata" | "pandas" => "py",
        "javascript" => "js",
        "typescript" => "ts",
        "php" => "php",
        "swift" => "swift",
        "kotlin" => "kt",
        "dart" => "dart",
        "golang" | "go" => "go",
        "ruby" => "rb",
        "scala" => "scala",
        "rust" => "rs",
        "racket" => "rkt",
        "erlang" => "erl",
        "elixir" => "ex",
        "mysql" | "mssql" | "oraclesql" | "postgresql" => "sql",
        "bash" => "sh",
        "text" | "" => "txt",
        _ => "",
    };

    if !known.is_empty() {
        return known.to_string();
    }

    let cleaned: String = lang.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        "txt".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(file_extension("python3"), "py");
        assert_eq!(file_extension("cpp"), "cpp");
        assert_eq!(file_extension("rust"), "rs");
        assert_eq!(file_extension("golang"), "go");
        assert_eq!(file_extension("mysql"), "sql");
        assert_eq!(file_extension("Java"), "java");
    }

    #[test]
    fn test_unknown_and_empty_languages() {
        assert_eq!(file_extension("cobol"), "cobol");
        assert_eq!(file_extension("../evil"), "evil");
        assert_eq!(file_extension(""), "txt");
        assert_eq!(file_extension("///"), "txt");
    }
}
