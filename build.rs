use lightningcss::{
    bundler::{Bundler, FileProvider},
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions},
};
use std::fs;
use std::path::Path;

const CSS_ENTRY: &str = "assets/css/main.css";
const CSS_OUT_DIR: &str = "assets/dist";
const CSS_BUNDLE: &str = "assets/dist/bundle.css";

// Baked into the binary through option_env!
const CONFIG_VARS: [&str; 4] = [
    "WA_INBOX_API_BASE_URL",
    "WA_INBOX_REALTIME_URL",
    "WA_INBOX_BUSINESS_WA_ID",
    "WA_INBOX_LOG",
];

fn main() {
    println!("cargo:rerun-if-changed=assets/css/");
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    fs::create_dir_all(CSS_OUT_DIR).expect("Failed to create assets/dist directory");

    // Resolve main.css and its @import partials into one sheet
    let fs_provider = FileProvider::new();
    let mut bundler = Bundler::new(&fs_provider, None, ParserOptions::default());
    let mut stylesheet = bundler
        .bundle(Path::new(CSS_ENTRY))
        .expect("Failed to bundle CSS");

    stylesheet
        .minify(MinifyOptions::default())
        .expect("Failed to minify CSS");

    let css = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .expect("Failed to generate CSS output");

    fs::write(CSS_BUNDLE, css.code).expect("Failed to write bundle.css");
}
