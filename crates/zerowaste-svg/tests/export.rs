#[path = "export/label_placer.rs"]
mod label_placer;
#[path = "export/layout.rs"]
mod layout;
