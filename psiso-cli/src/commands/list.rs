use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

pub(crate) fn run_list() {
    log::info!("Supported platforms:");
    log::info!("");

    for analyzer in psiso_sony::all_analyzers() {
        let platform = analyzer.platform();
        log::info!(
            "  {} [{}]{}",
            analyzer.short_name().if_supports_color(Stdout, |t| t.bold()),
            analyzer
                .platform_name()
                .if_supports_color(Stdout, |t| t.cyan()),
            if analyzer.supports_patching() {
                format!(" {}", "(patch)".if_supports_color(Stdout, |t| t.green()))
            } else {
                String::new()
            },
        );
        log::info!("    Extensions: {}", analyzer.file_extensions().join(", "));
        log::info!("    Aliases: {}", platform.aliases().join(", "));
        log::info!(
            "    Titles from: {}",
            if platform.uses_title_database() {
                "title database"
            } else {
                "PARAM.SFO"
            }
        );
    }
}
