//! Integration tests for the generator commands against the bundled templates

use gin_scaffold::commands::{
    CommandContext, ControllerCommand, InitCommand, ModelCommand, ScaffoldCommand,
};
use gin_scaffold::scaffold::{Action, Outcome, RecordingSink};
use gin_scaffold::ScaffoldConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("templates")
}

fn context(cwd: &Path) -> CommandContext {
    let config = ScaffoldConfig {
        templates_dir: Some(templates_dir()),
        workspace_var: "GIN_SCAFFOLD_TEST_WORKSPACE_UNSET".to_string(),
        ..ScaffoldConfig::default()
    };
    CommandContext::new(config, cwd.to_path_buf())
}

fn fields(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Create `<tmp>/blog` with `init` and return a context rooted in it
fn init_blog(temp: &TempDir) -> CommandContext {
    let sink = RecordingSink::new();
    InitCommand::new(PathBuf::from("blog"))
        .execute(&context(temp.path()), &sink)
        .unwrap();
    context(&temp.path().join("blog"))
}

#[test]
fn test_init_creates_layout() {
    let temp = TempDir::new().unwrap();
    let sink = RecordingSink::new();

    let generated = InitCommand::new(PathBuf::from("blog"))
        .execute(&context(temp.path()), &sink)
        .unwrap();

    let project = temp.path().join("blog");
    for dir in ["models", "controllers", "helpers", "config", "templates"] {
        assert!(project.join(dir).is_dir(), "missing directory {dir}");
    }

    assert!(generated.iter().all(|(_, outcome)| *outcome == Outcome::Created));
    let outputs: Vec<&PathBuf> = generated.iter().map(|(path, _)| path).collect();
    assert!(outputs.contains(&&project.join("config/config.go")));
    assert!(outputs.contains(&&project.join("controllers/home.go")));
    assert!(outputs.contains(&&project.join("helpers/render.go")));
    assert_eq!(outputs.last(), Some(&&project.join("blog.go")));

    let main = fs::read_to_string(project.join("blog.go")).unwrap();
    assert!(main.contains("\"blog/controllers\""));
    assert!(main.lines().any(|line| line.trim_start().starts_with("// ROUTES")));

    let config = fs::read_to_string(project.join("config/config.go")).unwrap();
    assert!(config.contains("\"blog_\" + Environment()"));

    let home = fs::read_to_string(project.join("controllers/home.go")).unwrap();
    assert!(home.contains("\"application\": \"blog\""));
}

#[test]
fn test_init_twice_skips_everything() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let command = InitCommand::new(PathBuf::from("blog"));
    command.execute(&ctx, &RecordingSink::new()).unwrap();

    let main = temp.path().join("blog/blog.go");
    fs::write(&main, "edited").unwrap();

    let sink = RecordingSink::new();
    let generated = command.execute(&ctx, &sink).unwrap();

    assert!(generated.iter().all(|(_, outcome)| *outcome == Outcome::Skipped));
    assert!(sink.entries().iter().all(|(action, _)| *action == Action::Skip));
    assert_eq!(fs::read_to_string(main).unwrap(), "edited");
}

#[test]
fn test_model_requires_models_dir() {
    let temp = TempDir::new().unwrap();
    let result = ModelCommand::new("post".to_string(), fields(&["title:text"]))
        .execute(&context(temp.path()), &RecordingSink::new());

    let err = result.unwrap_err();
    assert!(err.to_string().contains("directory not found"));
}

#[test]
fn test_model_generation() {
    let temp = TempDir::new().unwrap();
    let ctx = init_blog(&temp);

    ModelCommand::new(
        "post".to_string(),
        fields(&["Title:text", "Views:integer", "PublishedAt:datetime"]),
    )
    .execute(&ctx, &RecordingSink::new())
    .unwrap();

    let model = fs::read_to_string(ctx.cwd.join("models/post.go")).unwrap();
    assert!(model.contains("type Post struct {"));
    assert!(model.contains("\tTitle string `json:\"title\"`"));
    assert!(model.contains("\tViews int `json:\"views\"`"));
    assert!(model.contains("\tPublishedAt int64 `json:\"published_at\"`"));

    let session = fs::read_to_string(ctx.cwd.join("models/post_dbsession.go")).unwrap();
    assert!(session.contains("\"blog/config\""));
    assert!(session.contains("VALUES ($1, $2, $3) RETURNING id"));
    assert!(session.contains("views = $3 WHERE id = $4"));
    assert!(session.contains("func AllPosts() ([]*Post, error)"));
}

#[test]
fn test_scaffold_generates_model_controller_and_routes() {
    let temp = TempDir::new().unwrap();
    let ctx = init_blog(&temp);
    let sink = RecordingSink::new();

    let generated = ScaffoldCommand::new(
        "posts".to_string(),
        fields(&["title:text", "views:integer", "published_at:datetime", "rank:int16"]),
    )
    .execute(&ctx, &sink)
    .unwrap();

    assert_eq!(
        generated,
        vec![
            (ctx.cwd.join("models/post.go"), Outcome::Created),
            (ctx.cwd.join("models/post_dbsession.go"), Outcome::Created),
            (ctx.cwd.join("controllers/posts.go"), Outcome::Created),
        ]
    );
    assert_eq!(
        sink.entries(),
        vec![
            (Action::Create, ctx.cwd.join("models/post.go")),
            (Action::Create, ctx.cwd.join("models/post_dbsession.go")),
            (Action::Create, ctx.cwd.join("controllers/posts.go")),
            (Action::Insert, ctx.cwd.join("blog.go")),
        ]
    );

    let controller = fs::read_to_string(ctx.cwd.join("controllers/posts.go")).unwrap();
    assert!(controller.contains("type PostsController struct{}"));
    assert!(controller.contains("\t\"strconv\"\n"));
    assert!(controller.contains("\t\"time\"\n"));
    assert!(controller.contains("post.Title = ctx.PostForm(\"title\")"));
    assert!(controller.contains("post.Views, _ = strconv.Atoi(ctx.PostForm(\"views\"))"));
    assert!(controller.contains(
        "postPublishedAt, err := time.Parse(\"2006-01-02 15:04:05\", ctx.PostForm(\"published_at\"))"
    ));
    assert!(controller.contains("postRank, _ := strconv.ParseInt(ctx.PostForm(\"rank\"), 10, 16)"));
    assert!(controller.contains("post.Rank = int16(postRank)"));

    let main = fs::read_to_string(ctx.cwd.join("blog.go")).unwrap();
    let lines: Vec<&str> = main.lines().collect();
    let marker = lines
        .iter()
        .position(|line| line.trim_start().starts_with("// ROUTES"))
        .unwrap();
    assert_eq!(
        lines[marker + 1],
        "\tpostsController := &controllers.PostsController{}"
    );
    assert_eq!(
        lines[marker + 2],
        "\trouter.GET(\"/posts\", postsController.Index)"
    );
}

#[test]
fn test_rerun_does_not_duplicate_routes() {
    let temp = TempDir::new().unwrap();
    let ctx = init_blog(&temp);
    let command = ControllerCommand::new("post".to_string(), fields(&["title:text"]));

    command.execute(&ctx, &RecordingSink::new()).unwrap();
    let sink = RecordingSink::new();
    let generated = command.execute(&ctx, &sink).unwrap();

    assert_eq!(generated, vec![(ctx.cwd.join("controllers/posts.go"), Outcome::Skipped)]);
    assert_eq!(sink.entries(), vec![(Action::Skip, ctx.cwd.join("controllers/posts.go"))]);

    let main = fs::read_to_string(ctx.cwd.join("blog.go")).unwrap();
    assert_eq!(main.matches("postsController :=").count(), 1);
}

#[test]
fn test_controller_without_marker_leaves_router_unchanged() {
    let temp = TempDir::new().unwrap();
    let ctx = init_blog(&temp);
    let router = ctx.cwd.join("blog.go");
    fs::write(&router, "package main\n\nfunc main() {}\n").unwrap();

    ControllerCommand::new("comments".to_string(), Vec::new())
        .execute(&ctx, &RecordingSink::new())
        .unwrap();

    assert_eq!(
        fs::read_to_string(&router).unwrap(),
        "package main\n\nfunc main() {}\n"
    );
    assert!(ctx.cwd.join("controllers/comments.go").exists());
}

#[test]
fn test_controller_missing_router_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("controllers")).unwrap();

    let result = ControllerCommand::new("post".to_string(), Vec::new())
        .execute(&context(temp.path()), &RecordingSink::new());

    assert!(result.is_err());
}

#[test]
fn test_configured_router_file_and_marker() {
    let temp = TempDir::new().unwrap();
    let project = init_blog(&temp).cwd;
    fs::write(project.join("routes.go"), "func routes() {\n// API\n}\n").unwrap();

    let config = ScaffoldConfig {
        templates_dir: Some(templates_dir()),
        workspace_var: "GIN_SCAFFOLD_TEST_WORKSPACE_UNSET".to_string(),
        route_marker: "// API".to_string(),
        router_file: Some(PathBuf::from("routes.go")),
    };
    let ctx = CommandContext::new(config, project.clone());

    ControllerCommand::new("tag".to_string(), Vec::new())
        .execute(&ctx, &RecordingSink::new())
        .unwrap();

    let routes = fs::read_to_string(project.join("routes.go")).unwrap();
    let lines: Vec<&str> = routes.lines().collect();
    assert_eq!(lines[1], "// API");
    assert_eq!(lines[2], "\ttagsController := &controllers.TagsController{}");
    assert_eq!(lines.last(), Some(&"}"));
}
