#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Acknowledge,
    Copy,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub label: String,
    pub action: DialogAction,
}

/// A modal alert: title, body and the buttons the user can choose from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    /// Alert with a single acknowledgement button
    pub fn alert(title: &str, message: &str, ok_label: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            buttons: vec![DialogButton {
                label: ok_label.to_string(),
                action: DialogAction::Acknowledge,
            }],
        }
    }

    /// Result alert offering "copy" and "dismiss"
    pub fn copyable(title: &str, message: &str, copy_label: &str, cancel_label: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            buttons: vec![
                DialogButton {
                    label: copy_label.to_string(),
                    action: DialogAction::Copy,
                },
                DialogButton {
                    label: cancel_label.to_string(),
                    action: DialogAction::Dismiss,
                },
            ],
        }
    }

    pub fn offers(&self, action: DialogAction) -> bool {
        self.buttons.iter().any(|b| b.action == action)
    }
}
