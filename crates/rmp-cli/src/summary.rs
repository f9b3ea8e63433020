use std::path::PathBuf;

use console::Style;
use rmp_core::pipeline::{RmpConfig, SliceSelection};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &RmpConfig, files: &[PathBuf], selection: &SliceSelection) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Rotational Morphology"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(21)));
    println!();

    for (i, file) in files.iter().enumerate() {
        let label = if i == 0 { "Input" } else { "" };
        println!(
            "  {:<14}{}",
            s.label.apply_to(label),
            s.path.apply_to(file.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Operator"),
        s.method.apply_to(config.operator)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Element"),
        s.value.apply_to(format!("{} {}", config.shape, config.se_size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Orientations"),
        s.value.apply_to(config.iterations)
    );

    let threads = if config.threads == 0 {
        "all cores".to_string()
    } else {
        config.threads.to_string()
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(threads)
    );

    if files.len() > 1 {
        let slices = match selection {
            SliceSelection::All => "all".to_string(),
            SliceSelection::Indices(indices) => indices
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!(
            "  {:<14}{}",
            s.label.apply_to("Slices"),
            s.value.apply_to(slices)
        );
    }
    println!();
}
