use backdrop::theme::FileThemeStore;

fn main() {
    env_logger::init();

    let store = FileThemeStore::new(FileThemeStore::default_path());
    if let Err(e) = backdrop::window::run(Box::new(store)) {
        eprintln!("backdrop: {}", e);
        std::process::exit(1);
    }
}
