pub(crate) const PREFIX: char = '-';
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const STDIN: &str = "-";
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const IMPLICIT_TRUE: &str = "true";
pub(crate) const IMPLICIT_FALSE: &str = "false";
pub(crate) const TRUE_FORMS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
pub(crate) const FALSE_FORMS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];
pub(crate) const LIST_SEPARATOR: char = ',';

/// The canonical text (`true`/`false`) of a boolean token, if it is one of the accepted forms.
pub(crate) fn canonical_bool(token: &str) -> Option<&'static str> {
    if TRUE_FORMS.contains(&token) {
        Some(IMPLICIT_TRUE)
    } else if FALSE_FORMS.contains(&token) {
        Some(IMPLICIT_FALSE)
    } else {
        None
    }
}
