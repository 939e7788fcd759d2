//! Default value functions referenced by `#[serde(default = "...")]`.

pub fn default_true() -> bool {
    true
}

pub fn root_class() -> String {
    "chatmark-md".to_string()
}

pub fn image_class() -> String {
    "md:max-w-2xl max-w-full".to_string()
}

pub fn image_style() -> String {
    "border-radius: 5px;".to_string()
}

pub fn copy_label() -> String {
    "Copy".to_string()
}

pub fn copied_label() -> String {
    "Copied".to_string()
}

pub fn diagram_languages() -> Vec<String> {
    vec!["mermaid".to_string()]
}

pub fn copied_feedback_ms() -> u64 {
    1000
}

pub fn highlight_class() -> String {
    "bg-active rounded-sm".to_string()
}

pub fn excluded_tags() -> Vec<String> {
    vec!["script".to_string(), "style".to_string(), "svg".to_string()]
}

pub fn anchor_offset_x() -> f32 {
    10.0
}

pub fn anchor_offset_y() -> f32 {
    -20.0
}
