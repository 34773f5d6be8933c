pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: column; background: #F0F0F0; font-family: sans-serif;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; background: #fff;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f6f6f6; border: 1px solid #bbb; padding: 6px; text-align: left; white-space: nowrap; cursor: pointer;"
}

pub fn table_cell_style(numeric: bool) -> String {
    let align = if numeric { "right" } else { "left" };
    format!("border: 1px solid #ddd; padding: 4px 6px; text-align: {align}; white-space: nowrap;")
}

pub fn tab_button_style(active: bool) -> String {
    let (background, color) = if active {
        ("#3f51b5", "#fff")
    } else {
        ("#e0e0e0", "#333")
    };
    format!("border: none; padding: 10px 18px; cursor: pointer; background: {background}; color: {color};")
}

pub fn sort_marker(active: bool, desc: bool) -> &'static str {
    match (active, desc) {
        (false, _) => "",
        (true, false) => " ▲",
        (true, true) => " ▼",
    }
}
