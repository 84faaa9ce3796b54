//! gridcalc CLI - formula inspection and sheet evaluation tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridcalc::prelude::*;
use gridcalc::{
    apply_edits, evaluate_input, parse, parse_script, tokenize, AstNode, Token, DEFAULT_COLS,
    DEFAULT_ROWS,
};
use log::info;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(
    author,
    version,
    about = "Spreadsheet formula inspection and evaluation tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a formula
    Tokens {
        /// Formula text (leading '=' optional)
        formula: String,

        /// Print JSON instead of one token per line
        #[arg(long)]
        json: bool,
    },

    /// Print the syntax tree of a formula
    Ast {
        /// Formula text (leading '=' optional)
        formula: String,

        /// Print JSON instead of the debug tree
        #[arg(long)]
        json: bool,

        /// Also list the cell references the formula reads
        #[arg(short, long)]
        references: bool,
    },

    /// Evaluate one cell input and print its display text
    Eval {
        /// Cell input; formulas start with '='
        input: String,

        /// Pre-fill a cell, e.g. --set 'A1=10' or --set 'B1==$A1*2'
        #[arg(long = "set", value_name = "ADDR=INPUT", value_parser = parse_assignment)]
        cells: Vec<(String, String)>,

        /// Maximum depth of nested references
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Replay an edit script into a sheet and print the grid
    Run {
        /// Edit script file ('-' for stdin)
        script: PathBuf,

        /// Number of rows in the sheet
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: u32,

        /// Number of columns in the sheet
        #[arg(long, default_value_t = DEFAULT_COLS)]
        cols: u16,

        /// Recalculate all formulas after the last edit
        #[arg(short, long)]
        recalculate: bool,

        /// Maximum depth of nested references
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// One non-empty cell in JSON output
#[derive(Serialize)]
struct CellRecord<'a> {
    address: String,
    input: &'a str,
    display: &'a str,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens { formula, json } => show_tokens(&formula, json),
        Commands::Ast {
            formula,
            json,
            references,
        } => show_ast(&formula, json, references),
        Commands::Eval {
            input,
            cells,
            max_depth,
        } => eval(&input, &cells, max_depth),
        Commands::Run {
            script,
            rows,
            cols,
            recalculate,
            max_depth,
            format,
        } => run(&script, rows, cols, recalculate, max_depth, format),
    }
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(addr, input)| (addr.trim().to_string(), input.to_string()))
        .ok_or_else(|| format!("expected ADDR=INPUT, got '{}'", s))
}

fn calculation_options(max_depth: Option<usize>) -> CalculationOptions {
    let mut options = CalculationOptions::default();
    if let Some(depth) = max_depth {
        options.evaluation.max_reference_depth = depth;
    }
    options
}

/// Formula body with an optional leading '=' removed
fn strip_formula(formula: &str) -> &str {
    let formula = formula.trim();
    formula.strip_prefix('=').unwrap_or(formula).trim()
}

fn show_tokens(formula: &str, json: bool) -> Result<()> {
    let tokens = tokenize(strip_formula(formula)).context("Failed to tokenize formula")?;

    if json {
        print_json(&tokens)
    } else {
        for token in &tokens {
            println!("{}", token);
        }
        Ok(())
    }
}

/// Tree plus the references it reads, for `ast --json --references`
#[derive(Serialize)]
struct AstReport<'a> {
    ast: &'a AstNode,
    references: Vec<&'a str>,
}

fn show_ast(formula: &str, json: bool, references: bool) -> Result<()> {
    let tokens: Vec<Token> =
        tokenize(strip_formula(formula)).context("Failed to tokenize formula")?;
    let ast: AstNode = parse(&tokens).context("Failed to parse formula")?;

    match (json, references) {
        (true, true) => print_json(&AstReport {
            ast: &ast,
            references: ast.references(),
        }),
        (true, false) => print_json(&ast),
        (false, with_refs) => {
            println!("{:#?}", ast);
            if with_refs {
                println!("References: {}", reference_list(&ast));
            }
            Ok(())
        }
    }
}

/// Comma-separated references of a tree, or `(none)`
fn reference_list(ast: &AstNode) -> String {
    let refs = ast.references();
    if refs.is_empty() {
        "(none)".to_string()
    } else {
        refs.join(", ")
    }
}

fn eval(input: &str, cells: &[(String, String)], max_depth: Option<usize>) -> Result<()> {
    let mut sheet = Sheet::default();
    for (address, cell_input) in cells {
        sheet
            .edit_cell(address, cell_input)
            .with_context(|| format!("Failed to set cell '{}'", address))?;
    }

    let options = calculation_options(max_depth);
    let ctx = EvaluationContext::new(&sheet).with_options(options.evaluation);
    println!("{}", evaluate_input(input, &ctx));

    Ok(())
}

fn run(
    script: &PathBuf,
    rows: u32,
    cols: u16,
    recalculate: bool,
    max_depth: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    if rows == 0 || cols == 0 {
        bail!("Sheet must have at least one row and one column");
    }

    let text = read_script(script)?;
    let edits = parse_script(&text)
        .with_context(|| format!("Failed to read '{}'", script.display()))?;

    let options = calculation_options(max_depth);
    let mut sheet = Sheet::new(rows, cols);
    apply_edits(&mut sheet, &edits, &options).context("Failed to apply edits")?;
    info!("Applied {} edits", edits.len());

    if recalculate {
        let stats = sheet
            .recalculate_with_options(&options)
            .context("Failed to recalculate formulas")?;

        eprintln!(
            "Calculated {} formulas ({} errors)",
            stats.cells_calculated, stats.errors
        );
    }

    let output = match format {
        OutputFormat::Table => render_table(&sheet),
        OutputFormat::Csv => render_csv(&sheet),
        OutputFormat::Json => {
            let records: Vec<CellRecord> = sheet
                .cells()
                .map(|(addr, cell)| CellRecord {
                    address: addr.to_string(),
                    input: &cell.input,
                    display: &cell.display,
                })
                .collect();
            serde_json::to_string_pretty(&records).context("Failed to serialize cells")? + "\n"
        }
    };

    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;

    Ok(())
}

fn read_script(script: &PathBuf) -> Result<String> {
    if script.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(script)
            .with_context(|| format!("Failed to open '{}'", script.display()))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Last used row and column, if any cell is set
fn used_extent(sheet: &Sheet) -> Option<(u32, u16)> {
    sheet.cells().fold(None, |extent, (addr, _)| match extent {
        None => Some((addr.row, addr.col)),
        Some((row, col)) => Some((row.max(addr.row), col.max(addr.col))),
    })
}

fn render_table(sheet: &Sheet) -> String {
    let Some((max_row, max_col)) = used_extent(sheet) else {
        return String::new();
    };

    let row_label_width = (max_row + 1).to_string().len();
    let widths: Vec<usize> = (0..=max_col)
        .map(|col| {
            (0..=max_row)
                .filter_map(|row| sheet.display_at(row, col))
                .map(|text| text.chars().count())
                .chain(std::iter::once(Sheet::column_label(col).len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&" ".repeat(row_label_width));
    for (col, &width) in widths.iter().enumerate() {
        out.push_str(&format!(" | {:<width$}", Sheet::column_label(col as u16)));
    }
    out.push('\n');

    for row in 0..=max_row {
        out.push_str(&format!("{:>row_label_width$}", row + 1));
        for (col, &width) in widths.iter().enumerate() {
            let text = sheet.display_at(row, col as u16).unwrap_or_default();
            out.push_str(&format!(" | {:<width$}", text));
        }
        out.push('\n');
    }

    out
}

fn render_csv(sheet: &Sheet) -> String {
    let Some((max_row, max_col)) = used_extent(sheet) else {
        return String::new();
    };

    let mut out = String::new();
    for row in 0..=max_row {
        let fields: Vec<String> = (0..=max_col)
            .map(|col| csv_field(sheet.display_at(row, col).unwrap_or_default()))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field if it contains CSV metacharacters
fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ast_of(formula: &str) -> AstNode {
        parse(&tokenize(strip_formula(formula)).unwrap()).unwrap()
    }

    #[test]
    fn test_reference_list() {
        assert_eq!(reference_list(&ast_of("=$A1+SUM($b2, 3)*$A1")), "$A1, $b2, $A1");
        assert_eq!(reference_list(&ast_of("1+2")), "(none)");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
