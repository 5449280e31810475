pub mod project;

pub use project::{FakeGenerator, Project};

#[allow(dead_code)]
pub fn get_automoc_binary() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("automoc")
}
