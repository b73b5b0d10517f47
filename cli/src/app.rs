//! CLI assembly for the `review` command: read inputs, run the review, print the result.
use std::path::Path;

use diffscope_core::api::{AnalysisRequest, AppContext, CliError};

use crate::commands::cli::{OutputFormat, ReviewArgs};
use crate::render::render_text;
use crate::utils::infer_language;

pub fn build_request(args: &ReviewArgs) -> Result<AnalysisRequest, CliError> {
    let new_code = std::fs::read_to_string(&args.new_path)?;
    let old_code = match &args.old_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };

    let file_path = args
        .file_path
        .clone()
        .unwrap_or_else(|| args.new_path.to_string_lossy().to_string());
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| infer_language(Path::new(&file_path)));

    Ok(AnalysisRequest::new(file_path, old_code, new_code, language))
}

#[tracing::instrument(name = "cli.review", skip(args, ctx))]
pub async fn run_review(args: ReviewArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let request = build_request(&args)?;
    let tasks = (!args.tasks.is_empty()).then(|| args.tasks.clone());

    let result = ctx.review(request, tasks, args.max_concurrency).await?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::Command(format!("failed to encode result: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text(&result)),
    }

    Ok(0)
}
