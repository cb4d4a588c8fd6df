use crate::table::Table;

/// Name of the synthetic column holding each row's source file label.
pub const FILE_NAME_COLUMN: &str = "File name";

/// Number of leading columns, by position, that are filled down.
pub const HEADER_COLUMN_COUNT: usize = 33;

/// Output column order. Absent columns are materialized as nulls; any other
/// column follows after these.
pub const REQUIRED_SCHEMA: [&str; 44] = [
    "Sea Waybill No",
    "POD",
    "POL",
    "POR",
    "Voyage No",
    "Vessel Name",
    "Pre-carriage By",
    "Notify Party",
    "Consignee",
    "Shipper",
    "Reference No",
    "Booking No",
    "Carrier Code",
    "POA",
    "Contains CY/DOOR?",
    "Freight Prepaid At",
    "HTS Code",
    "BL Issue Date",
    "Laden Onboard Date",
    "Also Notify Party",
    "Total Quantity",
    "Total Quantity UOM",
    "Total Volume",
    "Total Volume UOM",
    "Total Actual Gross Weight",
    "Total Actual Gross Weight UOM",
    "Service Contract No",
    "Yusen Remarks",
    "Cargo Received Date",
    "Place of BL Issue",
    "BL Prepared By",
    "Payment Terms",
    "Original BL No",
    "Line Number",
    "Container Number",
    "Container Type",
    "Seal Number",
    "Quantity",
    "Quantity UOM",
    "Gross Weight",
    "Gross Weight UOM",
    "Volume",
    "Volume UOM",
    FILE_NAME_COLUMN,
];

/// Reorders `table` to the required schema followed by its extra columns.
pub fn reorder(table: &Table) -> Table {
    let extra = table
        .column_names()
        .into_iter()
        .filter(|name| !REQUIRED_SCHEMA.contains(name));
    let order: Vec<&str> = REQUIRED_SCHEMA.iter().copied().chain(extra).collect();
    table.select(&order)
}
