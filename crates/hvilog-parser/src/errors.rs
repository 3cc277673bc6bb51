use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_index} field '{field}': {message}")]
    Field {
        line_index: usize,
        field: &'static str,
        message: String,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl ParseError {
    pub(crate) fn field(line_index: usize, field: &'static str, message: impl Into<String>) -> Self {
        ParseError::Field {
            line_index,
            field,
            message: message.into(),
        }
    }
}
