use std::cell::RefCell;

/// Canal de notification utilisé quand une assignation est refusée.
///
/// Les implémentations ne doivent pas bloquer indéfiniment ni avaler le message.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Ne fait rien ; le refus reste visible via le `Result` de `assign`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}

/// Écrit le message sur la sortie d'erreur (usage CLI).
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Conserve les messages reçus, dans l'ordre.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn take(&self) -> Vec<String> {
        self.messages.take()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// Toute closure `Fn(&str)` peut servir de notifier.
impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}
