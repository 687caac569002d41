use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "scrolldeck".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}
