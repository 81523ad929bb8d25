/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Description of the active image source.
    pub source_label: String,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
