pub mod lead_importer;
