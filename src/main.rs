//! # Formgrid CLI
//!
//! Usage:
//!   formgrid bundle.json -o form.json
//!   echo '{ ... }' | formgrid
//!   formgrid bundle.json --roundtrip
//!   formgrid --example > article.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_bundle_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    let roundtrip = args.iter().any(|a| a == "--roundtrip");
    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());

    let result = if roundtrip {
        formgrid::roundtrip_json(&input)
    } else {
        formgrid::normalize_json(&input)
    };

    match result {
        Ok(json) => match output_path {
            Some(path) => {
                fs::write(&path, &json).expect("Failed to write output");
                eprintln!("✓ Written {} bytes to {}", json.len(), path);
            }
            None => println!("{json}"),
        },
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn example_bundle_json() -> &'static str {
    r##"{
  "configuration": {
    "uid": "api::article.article",
    "layouts": {
      "edit": [
        [
          { "name": "title", "size": 6 },
          { "name": "slug", "size": 6 }
        ],
        [
          { "name": "body", "size": 12 }
        ],
        [
          { "name": "published", "size": 4 },
          { "name": "author", "size": 6 }
        ],
        [
          { "name": "seo", "size": 6 }
        ],
        [
          { "name": "blocks", "size": 12 }
        ]
      ],
      "list": ["title", "author", "published"]
    },
    "metadatas": {
      "title": {
        "edit": { "label": "Title", "placeholder": "Post title" },
        "list": { "label": "Title" }
      },
      "slug": {
        "edit": { "label": "Slug", "description": "URL segment, generated from the title" },
        "list": { "label": "Slug", "searchable": false }
      },
      "body": {
        "edit": { "label": "Body" },
        "list": { "label": "Body", "sortable": false }
      },
      "published": {
        "edit": { "label": "Published" },
        "list": { "label": "Published" }
      },
      "author": {
        "edit": { "label": "Author", "mainField": "name" },
        "list": { "label": "Author", "sortable": false }
      },
      "seo": {
        "edit": { "label": "SEO" },
        "list": { "label": "SEO", "searchable": false, "sortable": false }
      },
      "blocks": {
        "edit": { "label": "Content blocks" },
        "list": { "label": "Blocks", "searchable": false, "sortable": false }
      }
    },
    "settings": {
      "mainField": "title",
      "defaultSortBy": "title",
      "defaultSortOrder": "ASC",
      "pageSize": 10,
      "searchable": true,
      "filterable": true,
      "bulkable": true
    }
  },
  "schema": {
    "uid": "api::article.article",
    "attributes": {
      "title": { "type": "string" },
      "slug": { "type": "string" },
      "body": { "type": "richtext" },
      "published": { "type": "boolean" },
      "author": { "type": "relation", "target": "api::author.author" },
      "seo": { "type": "component", "component": "shared.seo", "repeatable": false },
      "blocks": { "type": "dynamiczone", "components": ["shared.quote"] }
    }
  },
  "components": {
    "api::author.author": {
      "schema": {
        "uid": "api::author.author",
        "attributes": {
          "name": { "type": "string" },
          "email": { "type": "email" }
        }
      },
      "configuration": {
        "uid": "api::author.author",
        "layouts": {
          "edit": [
            [
              { "name": "name", "size": 6 },
              { "name": "email", "size": 6 }
            ]
          ],
          "list": ["name", "email"]
        },
        "metadatas": {},
        "settings": {
          "mainField": "name",
          "defaultSortBy": "name",
          "defaultSortOrder": "ASC",
          "pageSize": 10,
          "searchable": true,
          "filterable": true,
          "bulkable": true
        }
      }
    },
    "shared.seo": {
      "schema": {
        "uid": "shared.seo",
        "attributes": {
          "metaTitle": { "type": "string" },
          "metaDescription": { "type": "text" }
        }
      },
      "configuration": {
        "uid": "shared.seo",
        "layouts": {
          "edit": [
            [
              { "name": "metaTitle", "size": 6 }
            ],
            [
              { "name": "metaDescription", "size": 12 }
            ]
          ],
          "list": []
        },
        "metadatas": {
          "metaTitle": {
            "edit": { "label": "Meta title" },
            "list": { "label": "Meta title" }
          }
        },
        "settings": {
          "mainField": "metaTitle",
          "defaultSortBy": "metaTitle",
          "defaultSortOrder": "ASC",
          "pageSize": 10,
          "searchable": true,
          "filterable": true,
          "bulkable": true
        }
      }
    },
    "shared.quote": {
      "schema": {
        "uid": "shared.quote",
        "attributes": {
          "quote": { "type": "text" },
          "attribution": { "type": "string" }
        }
      },
      "configuration": {
        "uid": "shared.quote",
        "layouts": {
          "edit": [
            [
              { "name": "quote", "size": 12 }
            ],
            [
              { "name": "attribution", "size": 6 }
            ]
          ],
          "list": []
        },
        "metadatas": {},
        "settings": {
          "mainField": "quote",
          "defaultSortBy": "quote",
          "defaultSortOrder": "ASC",
          "pageSize": 10,
          "searchable": true,
          "filterable": true,
          "bulkable": true
        }
      }
    }
  }
}"##
}
