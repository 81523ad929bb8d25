use console::Style;
use quadview_core::config::SourceConfig;
use quadview_core::pane::PaneKey;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Describe the source and list its complete sets.
pub fn print_source_summary(source: &SourceConfig, sets: &[String]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Quadview Sets"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    match source {
        SourceConfig::Http { base_url } => {
            println!("  {:<14}{}", s.label.apply_to("Server"), s.path.apply_to(base_url));
        }
        SourceConfig::Directory(dir) => {
            println!("  {}", s.header.apply_to("Directories"));
            for pane in PaneKey::ALL {
                println!(
                    "    {:<14}{}",
                    s.label.apply_to(pane),
                    s.path.apply_to(dir.dir_for(pane).join(dir.patterns.get(pane)).display())
                );
            }
        }
    }
    println!();

    if sets.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Sets"),
            s.disabled.apply_to("none found")
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Sets"),
            s.value.apply_to(sets.len())
        );
        for chunk in sets.chunks(8) {
            println!("    {}", chunk.join("  "));
        }
    }
    println!();
}
