/// A parsed unit of a template: literal text, or the trimmed content
/// of a delimiter-bounded expression.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // e.g. `<article class="project-card">`
    Text(String),
    // e.g. `{{ #formatCurrency stats.budget }}`
    Expression(String),
}
