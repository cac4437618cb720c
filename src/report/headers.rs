/// Display label for a field name: explicit overrides first, otherwise each
/// `_`-separated word gets an upper-cased first letter.
pub fn readable_header(field: &str) -> String {
    if let Some(label) = header_override(field) {
        return label.to_string();
    }

    field
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn header_override(field: &str) -> Option<&'static str> {
    let label = match field {
        "estimated_transit_days" => "Est. Transit",
        "kg_purchased" => "KG",
        "kg_sold" => "KG Sold",
        "kg_received" => "KG Received",
        "kg_lost" => "KG Lost",
        "loss_percentage" => "Loss %",
        "created_at" => "Created",
        "updated_at" => "Updated",
        "shipment_code" => "Shipment",
        "currency_code" => "Currency",
        "exchange_rate" => "Rate",
        "price_per_kg" => "Price/KG",
        "cost_per_kg" => "Cost/KG",
        "total_sale_amount" => "Total Sale",
        "total_purchase_amount" => "Total Purchase",
        "amount_paid" => "Paid",
        "balance_due" => "Balance",
        "payment_method" => "Method",
        "departure_date" => "Departure",
        "arrival_date" => "Arrival",
        "actual_arrival_date" => "Arrived",
        "customer_name" => "Customer",
        "supplier_name" => "Supplier",
        "product_name" => "Product",
        "full_name" => "Name",
        "is_active" => "Active",
        "last_login" => "Last Login",
        _ => return None,
    };
    Some(label)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
