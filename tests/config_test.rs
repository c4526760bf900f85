use mirage::config::Settings;
use mirage::domain::schema::CompiledSchema;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_endpoints_from_dir() -> anyhow::Result<()> {
    // Create a temporary directory
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("config/endpoints"))?;

    // Create mirage.toml
    let mirage_toml = r#"
[server]
host = "127.0.0.1"
port = 3000
base_path = "/api/fake"
"#;
    fs::write(root.join("mirage.toml"), mirage_toml)?;

    // Endpoints in YAML
    let blog_yaml = r#"
posts:
  _settings:
    identifiable: slug
    paginate: 5
  id: random_digit_not_null
  title: word
  slug: word
  text: paragraph|2
  category: _categories

categories:
  id: random_digit_not_null
  name: word
  image: image_url
"#;
    fs::write(root.join("config/endpoints/blog.yaml"), blog_yaml)?;

    // Endpoints in JSON
    let users_json = r#"
{
    "users": {
        "_settings": { "paginate": false },
        "id": "uuid",
        "name": "name",
        "email": "email"
    }
}
"#;
    fs::write(root.join("config/endpoints/users.json"), users_json)?;

    // Load settings
    let settings = Settings::from_root(root.to_str().unwrap())?;

    // Verify endpoints
    assert_eq!(settings.endpoints.len(), 3);
    assert!(settings.endpoints.contains_key("posts"));
    assert!(settings.endpoints.contains_key("categories"));
    assert!(settings.endpoints.contains_key("users"));

    // Field order follows the file
    let posts = &settings.endpoints["posts"];
    let fields: Vec<&str> = posts.fields.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["id", "title", "slug", "text", "category"]);

    // Settings block parsed, not treated as a field
    assert_eq!(posts.settings.identifiable, "slug");
    assert_eq!(posts.settings.paginate, Some(5));
    assert!(!posts.fields.contains_key("_settings"));

    // `paginate: false` disables pagination
    assert_eq!(settings.endpoints["users"].settings.paginate, None);

    // Defaults apply where _settings is absent
    assert_eq!(settings.endpoints["categories"].settings.identifiable, "id");
    assert!(!settings.endpoints["categories"].settings.auth);

    Ok(())
}

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.server.base_path, "/api/fake");
    assert!(settings.endpoints.is_empty());

    Ok(())
}

#[test]
fn test_validation_rejects_empty_directive() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/endpoints"))?;
    fs::write(
        root.join("config/endpoints/bad.yaml"),
        "posts:\n  title: \"\"\n",
    )?;

    let result = Settings::from_root(root.to_str().unwrap());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("posts.title"), "unexpected error: {err}");

    Ok(())
}

#[test]
fn test_unknown_generator_fails_at_compile() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/endpoints"))?;
    fs::write(
        root.join("config/endpoints/bad.yaml"),
        "posts:\n  title: definitely_not_a_generator\n",
    )?;

    // Structural validation passes; compilation catches the tag.
    let settings = Settings::from_root(root.to_str().unwrap())?;
    let errors = CompiledSchema::compile(&settings).unwrap_err();
    assert!(errors[0]
        .to_string()
        .contains("definitely_not_a_generator"));

    Ok(())
}

#[test]
fn test_later_files_override_earlier_endpoints() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/endpoints"))?;

    // Glob yields files in name order; b.yaml overrides a.yaml.
    fs::write(
        root.join("config/endpoints/a.yaml"),
        "posts:\n  title: word\n",
    )?;
    fs::write(
        root.join("config/endpoints/b.yaml"),
        "posts:\n  headline: sentence\n",
    )?;

    let settings = Settings::from_root(root.to_str().unwrap())?;
    assert_eq!(settings.endpoints.len(), 1);
    let fields: Vec<&str> = settings.endpoints["posts"]
        .fields
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(fields, vec!["headline"]);

    Ok(())
}
