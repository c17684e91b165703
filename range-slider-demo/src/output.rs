use console::style;

const STATUS_WIDTH: usize = 12;

pub fn status(label: &str, message: impl AsRef<str>) {
    println!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn event(message: impl AsRef<str>) {
    println!("{:>width$} {}", style("event").cyan(), message.as_ref(), width = STATUS_WIDTH);
}

pub fn step(message: impl AsRef<str>) {
    println!("    {}", message.as_ref());
}
