//! Domain helpers: the progress-bar fragment and the display labels
//! for the closed sets of project categories and statuses. Unknown
//! codes fall through unchanged.
use crate::lexer::Value;

pub fn progress_bar(percentage: &Value) -> String {
    format!(
        r#"<div class="progress-bar"><div class="progress-fill" style="width: {}%"></div></div>"#,
        percentage
    )
}

pub fn status_label(code: &str) -> Option<&'static str> {
    match code {
        "active" => Some("Ativo"),
        "completed" => Some("Concluído"),
        "planning" => Some("Planejamento"),
        _ => None,
    }
}

pub fn category_label(code: &str) -> Option<&'static str> {
    match code {
        "education" => Some("Educação"),
        "health" => Some("Saúde"),
        "environment" => Some("Meio Ambiente"),
        "development" => Some("Desenvolvimento"),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(status_label("active"), Some("Ativo"));
        assert_eq!(status_label("archived"), None);
        assert_eq!(category_label("environment"), Some("Meio Ambiente"));
    }

    #[test]
    fn test_progress_bar() {
        let markup = progress_bar(&Value::Integer(75));
        assert!(markup.contains("width: 75%"));
    }
}
