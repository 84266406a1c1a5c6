use clap::{Parser, Subcommand, ValueEnum};
use form_metadata_sharing::{
    AttributeDescriptor, DrugOrderTagDescriptor, HtmlForm, MapSubstituter, MemoryCatalog,
    PropertyRegistry, SubstitutionMap, TagConfig, TagSchemaResolver,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "form-metadata")]
#[command(about = "Rewrite and inspect reference-data dependencies of form templates")]
#[command(version)]
struct Cli {
    /// Tag naming configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace entity references using a substitution map
    Substitute {
        /// Path to the form XML
        #[arg(short, long)]
        form: PathBuf,
        /// Substitution map (JSON list of {source, target} pairs)
        #[arg(short, long)]
        map: PathBuf,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on values the map does not cover
        #[arg(long)]
        strict: bool,
    },
    /// List the entities a form depends on
    Dependencies {
        /// Path to the form XML
        #[arg(short, long)]
        form: PathBuf,
        /// Local reference data (JSON list of entities)
        #[arg(long)]
        catalog: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the property to entity type table
    Properties,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TagConfig::from_json_file(path)?,
        None => TagConfig::default(),
    };

    match cli.command {
        Commands::Substitute {
            form,
            map,
            output,
            strict,
        } => substitute(config, &form, &map, output.as_deref(), strict)?,
        Commands::Dependencies {
            form,
            catalog,
            format,
        } => dependencies(config, &form, &catalog, format)?,
        Commands::Properties => properties(),
    }

    Ok(())
}

fn read_form(path: &Path) -> std::result::Result<HtmlForm, Box<dyn std::error::Error>> {
    let xml = std::fs::read_to_string(path)?;
    let name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
    let form = HtmlForm::new(xml);
    Ok(match name {
        Some(name) => form.with_name(name),
        None => form,
    })
}

fn substitute(
    config: TagConfig,
    form_path: &Path,
    map_path: &Path,
    output: Option<&Path>,
    strict: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut form = read_form(form_path)?;
    let map: SubstitutionMap = serde_json::from_str(&std::fs::read_to_string(map_path)?)?;
    let substituter = if strict {
        MapSubstituter::strict()
    } else {
        MapSubstituter::new()
    };

    // Substitution never consults the resolver.
    let descriptor = DrugOrderTagDescriptor::new(TagSchemaResolver::new(MemoryCatalog::new()))
        .with_config(config);
    let report = descriptor.perform_substitutions(&mut form, &substituter, &map)?;

    match output {
        Some(path) => {
            std::fs::write(path, &form.xml_data)?;
            eprintln!(
                "✅ {} of {} values substituted, written to {}",
                report.values_changed,
                report.values_seen,
                path.display()
            );
        }
        None => println!("{}", form.xml_data),
    }
    if report.compound_nodes_skipped > 0 {
        eprintln!(
            "⚠️  {} <{}> elements left unchanged",
            report.compound_nodes_skipped,
            descriptor.config().compound_tag
        );
    }

    Ok(())
}

fn dependencies(
    config: TagConfig,
    form_path: &Path,
    catalog_path: &Path,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let form = read_form(form_path)?;
    let catalog = MemoryCatalog::from_json_file(catalog_path)?;
    let resolver = TagSchemaResolver::new(catalog).with_config(config.clone());
    let descriptor = DrugOrderTagDescriptor::new(resolver).with_config(config);

    let registry = descriptor.dependencies(&form)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&registry)?),
        OutputFormat::Text => {
            if registry.is_empty() {
                println!("No dependencies found");
                return Ok(());
            }
            println!("Dependencies of {form}:");
            for (entity_type, entities) in registry.sorted() {
                println!("\n{entity_type} ({}):", entities.len());
                for entity in entities {
                    println!("  - {} ({})", entity.display_name(), entity.uuid);
                }
            }
        }
    }

    Ok(())
}

fn properties() {
    println!("Property to entity type:");
    for (property, entity_type) in PropertyRegistry::drug_order().iter() {
        println!("  {property:<20} {entity_type}");
    }
}
