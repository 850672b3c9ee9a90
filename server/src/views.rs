//! HTML views
//!
//! Server-rendered pages for the inventory. All user-supplied text goes
//! through `escape_html` before it reaches the markup.

use crate::database::Item;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>
<a href="/">Add item</a> |
<a href="/inventory">Inventory</a> |
<a href="/inventory/read-only">Read-only view</a> |
<a href="/archived">Archived</a>
</nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

/// Upload form for a new item
pub fn home_page() -> String {
    let form = r#"<form action="/upload" method="post" enctype="multipart/form-data">
<label>Name <input type="text" name="itemName" required></label><br>
<label>Value <input type="number" step="0.01" name="itemValue" required></label><br>
<label>Cost <input type="number" step="0.01" name="itemCost" required></label><br>
<label>Notes <textarea name="itemNotes"></textarea></label><br>
<label>Photo <input type="file" name="itemPhoto" accept=".png,.jpg,.jpeg,.gif" required></label><br>
<button type="submit">Upload</button>
</form>"#;
    layout("Furniture Inventory", form)
}

fn item_row(item: &Item, controls: bool) -> String {
    let mut row = format!(
        "<tr><td>{id}</td><td><img src=\"{photo}\" alt=\"{name}\" width=\"120\"></td>\
         <td>{name}</td><td>{value:.2}</td><td>{cost:.2}</td><td>{notes}</td>",
        id = item.id,
        photo = escape_html(&item.photo_path),
        name = escape_html(&item.name),
        value = item.value,
        cost = item.cost,
        notes = escape_html(&item.notes),
    );

    if controls {
        row.push_str(&format!(
            "<td><a href=\"/edit/{id}\">Edit</a>\
             <form action=\"/archive/{id}\" method=\"post\"><button type=\"submit\">Archive</button></form>\
             <form action=\"/delete/{id}\" method=\"post\"><button type=\"submit\">Delete</button></form></td>",
            id = item.id
        ));
    }

    row.push_str("</tr>\n");
    row
}

fn item_table(items: &[Item], controls: bool) -> String {
    if items.is_empty() {
        return "<p>No items.</p>".to_string();
    }

    let mut table = String::from(
        "<table>\n<tr><th>ID</th><th>Photo</th><th>Name</th><th>Value</th><th>Cost</th><th>Notes</th>",
    );
    if controls {
        table.push_str("<th>Actions</th>");
    }
    table.push_str("</tr>\n");

    for item in items {
        table.push_str(&item_row(item, controls));
    }

    table.push_str("</table>");
    table
}

/// Active items, with edit/archive/delete controls unless read-only
pub fn inventory_page(items: &[Item], read_only: bool) -> String {
    let title = if read_only {
        "Inventory (read-only)"
    } else {
        "Inventory"
    };
    layout(title, &item_table(items, !read_only))
}

/// Archived items
pub fn archived_page(items: &[Item]) -> String {
    layout("Archived Items", &item_table(items, false))
}

/// Edit form prefilled with the current record
pub fn edit_page(item: &Item) -> String {
    let form = format!(
        r#"<img src="{photo}" alt="{name}" width="200">
<form action="/edit/{id}" method="post">
<label>Name <input type="text" name="itemName" value="{name}" required></label><br>
<label>Value <input type="number" step="0.01" name="itemValue" value="{value}" required></label><br>
<label>Cost <input type="number" step="0.01" name="itemCost" value="{cost}" required></label><br>
<label>Notes <textarea name="itemNotes">{notes}</textarea></label><br>
<button type="submit">Save</button>
</form>"#,
        id = item.id,
        photo = escape_html(&item.photo_path),
        name = escape_html(&item.name),
        value = item.value,
        cost = item.cost,
        notes = escape_html(&item.notes),
    );
    layout("Edit Item", &form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(archived: bool) -> Item {
        Item {
            id: 7,
            name: "<b>Chair</b>".to_string(),
            value: 50.0,
            cost: 20.125,
            notes: "Tom's \"best\" chair".to_string(),
            photo_path: "/uploads/chair.jpg".to_string(),
            archived,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_inventory_page_escapes_and_formats() {
        let page = inventory_page(&[item(false)], false);

        assert!(page.contains("&lt;b&gt;Chair&lt;/b&gt;"));
        assert!(!page.contains("<b>Chair</b>"));
        assert!(page.contains("<td>50.00</td>"));
        assert!(page.contains("action=\"/archive/7\""));
        assert!(page.contains("action=\"/delete/7\""));
    }

    #[test]
    fn test_read_only_page_has_no_controls() {
        let page = inventory_page(&[item(false)], true);

        assert!(!page.contains("/archive/7"));
        assert!(!page.contains("/delete/7"));
        assert!(!page.contains("/edit/7"));
    }

    #[test]
    fn test_empty_listing() {
        assert!(archived_page(&[]).contains("No items."));
    }

    #[test]
    fn test_edit_page_prefills_fields() {
        let page = edit_page(&item(true));

        assert!(page.contains("action=\"/edit/7\""));
        assert!(page.contains("value=\"&lt;b&gt;Chair&lt;/b&gt;\""));
        assert!(page.contains("Tom&#x27;s &quot;best&quot; chair"));
    }

    #[test]
    fn test_home_page_form_fields() {
        let page = home_page();
        for field in ["itemName", "itemValue", "itemCost", "itemNotes", "itemPhoto"] {
            assert!(page.contains(&format!("name=\"{}\"", field)));
        }
    }
}
