#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(err) = stepbox_ui::run() {
        eprintln!("StepBox failed: {err}");
        std::process::exit(1);
    }
}
