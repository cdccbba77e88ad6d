use graph_editor;

fn main() -> Result<(), eframe::Error> {
    // Set up logging; filter with RUST_LOG
    env_logger::init();

    // Run the graph editor application
    graph_editor::run_app()
}
