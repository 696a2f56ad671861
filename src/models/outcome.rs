/// One detected text region returned by the recognition service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub text: String,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ServiceError,
    NoTextFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// The single result of one recognition call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Success(Vec<TextFragment>),
    Failure(RecognitionFailure),
}

impl RecognitionOutcome {
    /// Wrap a fragment list, reporting an empty one as `NoTextFound`
    pub fn from_fragments(fragments: Vec<TextFragment>) -> Self {
        if fragments.is_empty() {
            Self::no_text_found()
        } else {
            RecognitionOutcome::Success(fragments)
        }
    }

    pub fn service_error(message: impl Into<String>) -> Self {
        RecognitionOutcome::Failure(RecognitionFailure {
            kind: FailureKind::ServiceError,
            message: message.into(),
        })
    }

    pub fn no_text_found() -> Self {
        RecognitionOutcome::Failure(RecognitionFailure {
            kind: FailureKind::NoTextFound,
            message: String::new(),
        })
    }
}

/// Text shown in the result dialog and placed on the clipboard.
///
/// Every fragment is wrapped in newlines, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText(String);

impl DisplayText {
    pub fn from_fragments(fragments: &[TextFragment]) -> Self {
        let mut text = String::new();
        for fragment in fragments {
            text.push('\n');
            text.push_str(&fragment.text);
            text.push('\n');
        }
        DisplayText(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_wraps_each_fragment() {
        let fragments = vec![TextFragment::new("Hello"), TextFragment::new("World")];
        assert_eq!(
            DisplayText::from_fragments(&fragments).as_str(),
            "\nHello\n\nWorld\n"
        );
    }

    #[test]
    fn test_display_text_keeps_multiline_fragments() {
        let fragments = vec![TextFragment::new("line one\nline two")];
        assert_eq!(
            DisplayText::from_fragments(&fragments).into_string(),
            "\nline one\nline two\n"
        );
    }

    #[test]
    fn test_empty_fragments_are_no_text_found() {
        match RecognitionOutcome::from_fragments(Vec::new()) {
            RecognitionOutcome::Failure(f) => assert_eq!(f.kind, FailureKind::NoTextFound),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
