//! HTML rendering of the listing page.

use std::fmt::Write;

use carlot_types::Car;

use crate::router::{CREATE_PATH, DELETE_PATH};

/// Render the listing page: every car with its image, a delete form with one
/// checkbox per car (named by id), and the create form.
pub fn render_listing(cars: &[Car]) -> String {
    let mut rows = String::new();
    for car in cars {
        let id = escape(car.id.as_str());
        let _ = write!(
            rows,
            r#"
        <tr>
          <td><input type="checkbox" name="{id}" form="delete-form"></td>
          <td><code>{short}</code></td>
          <td>{name}</td>
          <td>{category}</td>
          <td>{price}</td>
          <td><img src="{image}" alt="{name}" height="80"></td>
        </tr>"#,
            short = escape(car.id.short_id()),
            name = escape(&car.name),
            category = escape(&car.category),
            price = car.price,
            image = escape(&car.image_location),
        );
    }
    if cars.is_empty() {
        rows.push_str(r#"
        <tr><td colspan="6">No cars yet.</td></tr>"#);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Carlot</title>
</head>
<body>
  <h1>Cars ({count})</h1>
  <form id="delete-form" method="post" action="{DELETE_PATH}" enctype="multipart/form-data"></form>
  <table>
    <thead>
      <tr><th></th><th>Id</th><th>Name</th><th>Category</th><th>Price</th><th>Image</th></tr>
    </thead>
    <tbody>{rows}
    </tbody>
  </table>
  <button type="submit" form="delete-form">Delete selected</button>

  <h2>Add a car</h2>
  <form method="post" action="{CREATE_PATH}" enctype="multipart/form-data">
    <label>Name <input type="text" name="name" required></label>
    <label>Category <input type="text" name="category" required></label>
    <label>Price <input type="number" name="price" min="0" step="any" required></label>
    <label>Image <input type="file" name="image" accept="image/jpeg,image/png,image/gif" required></label>
    <button type="submit">Add</button>
  </form>
</body>
</html>
"#,
        count = cars.len(),
    )
}

/// Escape text for use in HTML element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
