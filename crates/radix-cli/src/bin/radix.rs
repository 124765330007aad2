use std::ops::RangeInclusive;
use std::process;

use clap::{Args, Parser, Subcommand};

use radix_cli::commands::query_ops::{self, LookupOptions};
use radix_cli::commands::{config_ops, table_ops};
use radix_cli::trace_init::init_tracing;
use radix_core::query::{ComponentFilter, DisplayMode, ResultFilter};
use radix_core::unicode::Idc;

#[derive(Parser)]
#[command(name = "radix", about = "Chinese character decomposition explorer")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

/// Filters over the characters containing a component.
#[derive(Args)]
struct ResultArgs {
    /// Structure of result characters (glyph such as ⿰, or a name like "left right")
    #[arg(long, value_parser = query_ops::parse_structure)]
    structure: Option<Idc>,
    /// Radical of result characters
    #[arg(long)]
    radical: Option<String>,
    /// Stroke count range, e.g. 4-14
    #[arg(long, value_parser = query_ops::parse_stroke_range)]
    strokes: Option<RangeInclusive<u32>>,
    /// 1 for single characters, 2-4 for compounds of that length
    #[arg(long, default_value = "1", value_parser = query_ops::parse_mode)]
    mode: DisplayMode,
}

impl ResultArgs {
    fn into_filter(self) -> ResultFilter {
        if let Some(range) = &self.strokes {
            if let Err(e) = query_ops::check_stroke_bounds(range) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        ResultFilter {
            structure: self.structure,
            radical: self.radical,
            strokes: self.strokes,
            mode: self.mode,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show table and index statistics
    Info {
        /// Character table (JSON)
        table_file: String,
        /// Index depth (default from settings)
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Show one character's metadata, compounds and components
    Show {
        /// Character table (JSON)
        table_file: String,
        /// Character to show
        character: String,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// List every component a character expands to
    Expand {
        /// Character table (JSON)
        table_file: String,
        /// Character to expand
        character: String,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// List characters containing a component
    Lookup {
        /// Character table (JSON)
        table_file: String,
        /// Component to look up
        component: String,
        #[arg(long)]
        depth: Option<u32>,
        /// Prebuilt index snapshot (from `compile`)
        #[arg(long)]
        index: Option<String>,
        #[command(flatten)]
        filter: ResultArgs,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Results per page (default from settings)
        #[arg(long)]
        per_page: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the structure and radical filters available for a component
    Facets {
        /// Character table (JSON)
        table_file: String,
        /// Component to inspect
        component: String,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Browse indexed components
    Components {
        /// Character table (JSON)
        table_file: String,
        /// Exact stroke count of the component
        #[arg(long)]
        strokes: Option<u32>,
        /// Radical of the component
        #[arg(long)]
        radical: Option<String>,
        /// Structure of the component
        #[arg(long, value_parser = query_ops::parse_structure)]
        structure: Option<Idc>,
        #[arg(long)]
        depth: Option<u32>,
        /// Print the available filter values instead of components
        #[arg(long)]
        facets: bool,
    },
    /// Print a component's compounds under the export prompt
    Export {
        /// Character table (JSON)
        table_file: String,
        /// Component to export
        component: String,
        #[arg(long)]
        depth: Option<u32>,
        #[command(flatten)]
        filter: ResultArgs,
        /// Override the prompt from settings
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Build an index and write it as a snapshot
    Compile {
        /// Character table (JSON)
        table_file: String,
        /// Output snapshot file
        output_file: String,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    if let Some(file) = &cli.settings {
        config_ops::apply_settings_file(file);
    }

    match cli.command {
        Command::Info { table_file, depth } => table_ops::info(&table_file, depth),
        Command::Show {
            table_file,
            character,
            depth,
        } => table_ops::show(&table_file, &character, depth),
        Command::Expand {
            table_file,
            character,
            depth,
        } => table_ops::expand(&table_file, &character, depth),
        Command::Lookup {
            table_file,
            component,
            depth,
            index,
            filter,
            page,
            per_page,
            json,
        } => {
            let opts = LookupOptions {
                depth,
                index_file: index,
                filter: filter.into_filter(),
                page,
                per_page,
                json,
            };
            query_ops::lookup(&table_file, &component, &opts);
        }
        Command::Facets {
            table_file,
            component,
            depth,
        } => query_ops::facets(&table_file, &component, depth),
        Command::Components {
            table_file,
            strokes,
            radical,
            structure,
            depth,
            facets,
        } => {
            let filter = ComponentFilter {
                strokes,
                radical,
                structure,
            };
            query_ops::components(&table_file, &filter, depth, facets);
        }
        Command::Export {
            table_file,
            component,
            depth,
            filter,
            prompt,
        } => query_ops::export(
            &table_file,
            &component,
            &filter.into_filter(),
            depth,
            prompt.as_deref(),
        ),
        Command::Compile {
            table_file,
            output_file,
            depth,
        } => table_ops::compile(&table_file, &output_file, depth),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
