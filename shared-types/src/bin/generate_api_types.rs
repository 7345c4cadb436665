use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Shared types
    types.push(clean_type(FieldError::export_to_string()?));
    types.push(clean_type(ErrorResponse::export_to_string()?));

    // Lead types
    types.push(clean_type(CustomerType::export_to_string()?));
    types.push(clean_type(Lead::export_to_string()?));
    types.push(clean_type(LeadInput::export_to_string()?));
    types.push(clean_type(LeadImportRow::export_to_string()?));
    types.push(clean_type(ImportRowError::export_to_string()?));
    types.push(clean_type(ImportBatchResult::export_to_string()?));
    types.push(clean_type(ImportLeadsResponse::export_to_string()?));
    types.push(clean_type(LeadsResponse::export_to_string()?));

    // Project request types
    types.push(clean_type(ProjectRequestStatus::export_to_string()?));
    types.push(clean_type(ProjectRequestPriority::export_to_string()?));
    types.push(clean_type(ServiceType::export_to_string()?));
    types.push(clean_type(PropertyType::export_to_string()?));
    types.push(clean_type(ProjectRequest::export_to_string()?));
    types.push(clean_type(CreateProjectRequestInput::export_to_string()?));
    types.push(clean_type(UpdateStatusInput::export_to_string()?));
    types.push(clean_type(AssignProjectRequestInput::export_to_string()?));
    types.push(clean_type(ConvertProjectRequestInput::export_to_string()?));
    types.push(clean_type(ProjectRequestsResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strip the ts-rs banner and per-file imports; every type lands in the one
/// `types.ts` output, so references resolve without them.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let kept: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = kept.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
