use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{CatalogClient, FormMode, ProductApi, ProductForm, ProductList};
use shared::domain::{ProductId, ProductRequest, ProductResponse};
use tokio::io::{AsyncBufReadExt, BufReader};

mod config;

#[derive(Parser, Debug)]
#[command(about = "Interactive console frontend for the product catalog")]
struct Args {
    /// Base URL of the product backend; overrides catalog.toml and env vars.
    #[arg(long)]
    server_url: Option<String>,
}

#[derive(Debug)]
enum CommandOutcome {
    Continue,
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()?;
    let api: Arc<dyn ProductApi> =
        Arc::new(CatalogClient::new_with_http(http, settings.server_url.clone())?);

    let mut form = ProductForm::new(Arc::clone(&api));
    let mut list = ProductList::new(Arc::clone(&api));

    println!(
        "product catalog console - server {} (type 'help' for commands)",
        settings.server_url
    );

    // Both views fetch the full product set once at startup.
    if let Err(err) = list.init().await {
        tracing::error!(error = %err, "initial product fetch failed");
        eprintln!("initial product fetch failed: {err}");
    } else {
        render_products(list.products());
    }
    if let Err(err) = form.load_products().await {
        eprintln!("form listing fetch failed: {err}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(&form)?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            match run_command(line, api.as_ref(), &mut form, &mut list).await {
                Ok(CommandOutcome::Quit) => break,
                Ok(CommandOutcome::Continue) => {}
                Err(err) => eprintln!("error: {err}"),
            }
        }
        prompt(&form)?;
    }

    Ok(())
}

fn prompt(form: &ProductForm) -> Result<()> {
    match form.mode() {
        FormMode::Create => print!("create> "),
        FormMode::Edit { target } => print!("edit {target}> "),
    }
    io::stdout().flush()?;
    Ok(())
}

async fn run_command(
    line: &str,
    api: &dyn ProductApi,
    form: &mut ProductForm,
    list: &mut ProductList,
) -> Result<CommandOutcome> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    };

    match command {
        "help" => print_help(),
        "quit" | "exit" => return Ok(CommandOutcome::Quit),
        "list" => {
            list.refresh().await?;
            render_products(list.products());
        }
        "show" => render_form(form),
        "new" => {
            *form.draft_mut() = parse_new_draft(rest)?;
            render_form(form);
        }
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim_start()))
                .filter(|(field, value)| !field.is_empty() && !value.is_empty())
                .ok_or_else(|| anyhow!("usage: set <field> <value>"))?;
            set_draft_field(form.draft_mut(), field, value)?;
            render_form(form);
        }
        "edit" => {
            let id = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| anyhow!("usage: edit <id>"))?;
            let selected = find_product(form.products(), list.products(), id)
                .ok_or_else(|| anyhow!("no product with id '{id}' in the listing; run 'list'"))?;
            form.edit_product(&selected);
            render_form(form);
        }
        "submit" => {
            form.submit().await?;
            println!("submitted.");
            render_products(form.products());
        }
        "get" => {
            let id = rest
                .split_whitespace()
                .next()
                .ok_or_else(|| anyhow!("usage: get <id>"))?;
            let product = api.get_product_by_id(&ProductId::new(id)).await?;
            render_products(std::slice::from_ref(&product));
        }
        other => return Err(anyhow!("unknown command '{other}'; type 'help'")),
    }

    Ok(CommandOutcome::Continue)
}

fn find_product(
    form_products: &[ProductResponse],
    list_products: &[ProductResponse],
    id: &str,
) -> Option<ProductResponse> {
    form_products
        .iter()
        .chain(list_products)
        .find(|product| product.id.as_str() == id)
        .cloned()
}

/// Parses the one-line draft of the `new` command. All five fields are
/// required and the draft is only replaced once every field parsed; the
/// form's mode is left untouched.
fn parse_new_draft(rest: &str) -> Result<ProductRequest> {
    let mut fields = rest.split_whitespace();
    let (Some(sku), Some(name), Some(description), Some(price), Some(status), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(anyhow!(
            "usage: new <sku> <name> <description> <price> <status>"
        ));
    };

    Ok(ProductRequest {
        sku: sku.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: price
            .parse()
            .map_err(|_| anyhow!("price must be a number, got '{price}'"))?,
        status: parse_status(status)?,
    })
}

fn set_draft_field(draft: &mut ProductRequest, field: &str, value: &str) -> Result<()> {
    match field {
        "sku" => draft.sku = value.to_string(),
        "name" => draft.name = value.to_string(),
        "description" => draft.description = value.to_string(),
        "price" => {
            draft.price = value
                .parse()
                .map_err(|_| anyhow!("price must be a number, got '{value}'"))?;
        }
        "status" => draft.status = parse_status(value)?,
        other => return Err(anyhow!("unknown field '{other}'")),
    }
    Ok(())
}

fn parse_status(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "active" => Ok(true),
        "false" | "inactive" => Ok(false),
        other => Err(anyhow!(
            "status must be true/false or active/inactive, got '{other}'"
        )),
    }
}

fn status_label(status: bool) -> &'static str {
    if status {
        "active"
    } else {
        "inactive"
    }
}

fn render_products(products: &[ProductResponse]) {
    if products.is_empty() {
        println!("(no products)");
        return;
    }
    println!(
        "{:<26} {:<10} {:<24} {:>10} {:<8}",
        "id", "sku", "name", "price", "status"
    );
    for product in products {
        println!(
            "{:<26} {:<10} {:<24} {:>10.2} {:<8}",
            product.id,
            product.product.sku,
            product.product.name,
            product.product.price,
            status_label(product.product.status)
        );
    }
}

fn render_form(form: &ProductForm) {
    match form.mode() {
        FormMode::Create => println!("mode: create"),
        FormMode::Edit { target } => println!("mode: edit (target {target})"),
    }
    let draft = form.draft();
    println!("  sku:         {}", draft.sku);
    println!("  name:        {}", draft.name);
    println!("  description: {}", draft.description);
    println!("  price:       {:.2}", draft.price);
    println!("  status:      {}", status_label(draft.status));
}

fn print_help() {
    println!("commands:");
    println!("  list                     refresh and show the product listing");
    println!("  show                     show the current draft and mode");
    println!("  new <sku> <name> <description> <price> <status>");
    println!("                           fill the whole draft in one line");
    println!("  set <field> <value>      edit a draft field (sku, name, description, price, status)");
    println!("  edit <id>                load a listed product into the form for editing");
    println!("  submit                   submit the draft (create or update)");
    println!("  get <id>                 fetch a single product by id");
    println!("  quit                     leave the console");
}
