use clap::Parser;
use device_pricer::config::{Command, QuoteArgs};
use device_pricer::domain::ports::{SelectorView, TextField};
use device_pricer::utils::error::ErrorCategory;
use device_pricer::utils::logger;
use device_pricer::{
    CliConfig, Component, DeviceAttributeResolver, DeviceCatalog, DisplayNode, HeadlessForm,
    HttpPriceGateway, ModelOption, PriceCalculator, PricerConfig, Region,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting device-pricer CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let catalog = Arc::new(config.catalog()?);

    match &cli.command {
        Command::Types => {
            for device_type in catalog.device_types() {
                println!("{}", device_type);
            }
        }
        Command::Suggest { device_type, brand } => {
            let form = suggest(Arc::clone(&catalog), device_type, brand.as_deref());
            print_selector(&form);
        }
        Command::Quote(args) => {
            let code = quote(&config, catalog, args).await;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

fn suggest(catalog: Arc<DeviceCatalog>, device_type: &str, brand: Option<&str>) -> HeadlessForm {
    let mut form = HeadlessForm::new();
    form.select_device_type(device_type);

    let mut resolver = DeviceAttributeResolver::new(catalog, form);
    resolver.on_device_type_changed(device_type);
    if let Some(brand) = brand {
        resolver.view_mut().set_input_value(TextField::Brand, brand);
        resolver.on_brand_input_changed(device_type, brand);
    }
    resolver.into_view()
}

async fn quote(config: &PricerConfig, catalog: Arc<DeviceCatalog>, args: &QuoteArgs) -> i32 {
    let mut form = suggest(catalog, &args.device_type, args.brand.as_deref());
    if let Some(model) = &args.model {
        form.type_into(TextField::Model, model.clone());
    }
    form.select_model(args.model_id.as_ref().map(|id| ModelOption {
        value: id.clone(),
        base_price: args.base_price.clone(),
        release_year: args.release_year.clone(),
    }));
    for (name, value) in &args.fields {
        form.set_field(name.clone(), value.clone());
    }
    form.set_cookies(config.cookies());

    let gateway = HttpPriceGateway::new(config.endpoint());
    tracing::info!("🧮 Requesting quote from {}", gateway.endpoint());
    let mut calculator = PriceCalculator::new(form, gateway).with_timeout(config.timeout());

    let outcome = calculator.submit().await;
    print_price(calculator.view());

    match outcome {
        Ok(_) => 0,
        Err(e) => {
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            match e.category() {
                ErrorCategory::Validation => 2,
                ErrorCategory::Request => 1,
                ErrorCategory::Configuration => 1,
                ErrorCategory::System => 3,
            }
        }
    }
}

fn print_selector(form: &HeadlessForm) {
    for field in [TextField::Brand, TextField::Model] {
        println!("{:?} placeholder: {}", field, form.placeholder(field));
        for suggestion in form.suggestions(field) {
            println!("  - {}", suggestion);
        }
    }
    for component in Component::ALL {
        let state = form.field_state(component);
        println!(
            "{}: {} ({})",
            component.field_name(),
            state.condition(),
            if state.is_enabled() { "enabled" } else { "disabled" }
        );
    }
}

fn print_price(form: &HeadlessForm) {
    match form.visible_region() {
        Region::Initial => println!("No price calculated yet"),
        Region::Error => eprintln!("❌ {}", form.error_text()),
        Region::Result => {
            println!("✅ Total price: {}", form.text(DisplayNode::TotalPrice));
            println!("   Base price:  {}", form.text(DisplayNode::BasePrice));
            println!("   Device age:  {}", form.text(DisplayNode::DeviceAge));
            println!("   Condition:   {}", form.text(DisplayNode::DeviceCondition));
            if !form.material_lines().is_empty() {
                println!("   Material value:");
                for line in form.material_lines() {
                    println!("     ♻ {}", line);
                }
            }
        }
    }
}
