fn main() -> anyhow::Result<()> {
    training_dashboard::app::run::run()
}
