//! Export of stored transactions (Excel, CSV)

mod excel;

pub use excel::export_to_excel;
pub use weighbridge_infra::transaction_csv::export_to_csv;
