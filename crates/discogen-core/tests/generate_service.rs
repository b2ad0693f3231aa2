//! End-to-end generation test against a file-based discovery document.

use discogen_core::{generate, Config, DiscoveryContext};

const DOC: &str = r#"
{
    "name": "books",
    "version": "v1",
    "baseUrl": "https://www.googleapis.com/books/v1/",
    "resources": {
        "volumes": {
            "methods": {
                "get": {
                    "httpMethod": "GET",
                    "path": "volumes/{volumeId}",
                    "parameterOrder": ["volumeId"],
                    "parameters": {
                        "volumeId": {
                            "type": "string",
                            "location": "path",
                            "required": true,
                            "description": "ID of volume to retrieve."
                        },
                        "projection": {"type": "string", "location": "query"}
                    },
                    "response": {"$ref": "Volume"}
                },
                "insert": {
                    "httpMethod": "POST",
                    "path": "volumes",
                    "request": {"$ref": "Volume"},
                    "response": {"$ref": "Volume"}
                }
            }
        }
    },
    "schemas": {
        "Volume": {
            "type": "object",
            "description": "A single book volume.",
            "properties": {
                "title": {"type": "string"},
                "pageCount": {"type": "integer"},
                "related": {"type": "array", "items": {"$ref": "Volume"}}
            }
        }
    }
}
"#;

#[tokio::test]
async fn generates_client_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    tokio::fs::write(&path, DOC).await.unwrap();

    let ctx = DiscoveryContext::from_file(&path).await.unwrap();
    let mut config = Config::new("books-client", path.to_string_lossy(), "out");
    config.include_all = true;

    let report = generate(&ctx, &config).unwrap();
    assert!(report.issues.is_empty());

    let names: Vec<&str> = report.units.iter().map(|u| u.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["BooksService.cs", "Volume.cs", "VolumesResource.cs"]
    );

    let service = &report.units[0].text;
    assert!(service.contains("public class BooksService"));
    assert!(service.contains("public const string ServiceName = \"books\";"));

    let volume = &report.units[1].text;
    assert!(volume.contains("/// <summary>A single book volume.</summary>"));
    assert!(volume.contains("public string Title { get; set; }"));
    assert!(volume.contains("public long PageCount { get; set; }"));
    assert!(volume.contains("public IList<Volume> Related { get; set; }"));

    let volumes = &report.units[2].text;
    assert!(volumes.contains("public class VolumesResource"));
    // One factory and one request class per method.
    assert!(volumes.contains("public VolumesGetRequest Get()"));
    assert!(volumes.contains("public VolumesInsertRequest Insert()"));
    assert!(volumes.contains("get { return \"volumes/{volumeId}\"; }"));
    // Ordered parameter first, then remaining document order.
    let volume_id = volumes.find("public string VolumeId").unwrap();
    let projection = volumes.find("public string Projection").unwrap();
    assert!(volume_id < projection);
    // The request body property comes from the request schema reference.
    assert!(volumes.contains("public Volume Body { get; set; }"));
    // Doc comments survive sanitization.
    assert!(volumes.contains("/// <summary>ID of volume to retrieve.</summary>"));
}

#[tokio::test]
async fn rendering_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    tokio::fs::write(&path, DOC).await.unwrap();

    let ctx = DiscoveryContext::from_file(&path).await.unwrap();
    let mut config = Config::new("books-client", path.to_string_lossy(), "out");
    config.include_all = true;

    let first = generate(&ctx, &config).unwrap();
    let second = generate(&ctx, &config).unwrap();
    let a: Vec<_> = first.units.iter().map(|u| (&u.file_name, &u.text)).collect();
    let b: Vec<_> = second.units.iter().map(|u| (&u.file_name, &u.text)).collect();
    assert_eq!(a, b);
}
