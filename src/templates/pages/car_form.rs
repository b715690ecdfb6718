use crate::domain::car::{BodyType, CarInput, CarStatus, Condition, FuelType, Transmission};
use crate::templates::admin_layout;
use maud::{html, Markup};

pub struct CarFormVm {
    pub heading: String,
    pub action: String,
    pub values: Option<CarInput>,
    pub error: Option<String>,
}

fn text_field(label: &str, name: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        label {
            (label)
            input type="text" name=(name) value=(value.unwrap_or("")) required[required];
        }
    }
}

fn number_field(label: &str, name: &str, value: Option<i64>, required: bool) -> Markup {
    html! {
        label {
            (label)
            input type="number" name=(name) value=[value] required[required];
        }
    }
}

fn select_field(label: &str, name: &str, options: &[&str], current: Option<&str>) -> Markup {
    html! {
        label {
            (label)
            select name=(name) required {
                @for o in options {
                    option value=(o) selected[current == Some(*o)] { (o) }
                }
            }
        }
    }
}

fn names<T: Copy>(all: &[T], f: fn(T) -> &'static str) -> Vec<&'static str> {
    all.iter().map(|v| f(*v)).collect()
}

pub fn car_form_page(vm: &CarFormVm) -> Markup {
    let v = vm.values.as_ref();

    admin_layout(
        &vm.heading,
        "/admin/cars",
        html! {
            h1 { (vm.heading) }
            @if let Some(err) = &vm.error {
                p class="alert error" { (err) }
            }

            form class="car-form" action=(vm.action) method="post" {
                fieldset {
                    legend { "Basics" }
                    (text_field("Title", "title", v.map(|v| v.title.as_str()), true))
                    (text_field("Brand", "brand", v.map(|v| v.brand.as_str()), true))
                    (text_field("Model", "model", v.map(|v| v.model.as_str()), true))
                    (number_field("Year", "year", v.map(|v| v.year), true))
                    (number_field("Price (€)", "price", v.map(|v| v.price), true))
                    (number_field("Mileage (km)", "mileage", v.map(|v| v.mileage), true))
                }
                fieldset {
                    legend { "Specs" }
                    (select_field("Fuel", "fuel_type", &names(FuelType::ALL, FuelType::as_str), v.map(|v| v.fuel_type.as_str())))
                    (select_field("Transmission", "transmission", &names(Transmission::ALL, Transmission::as_str), v.map(|v| v.transmission.as_str())))
                    (select_field("Body", "body_type", &names(BodyType::ALL, BodyType::as_str), v.map(|v| v.body_type.as_str())))
                    (select_field("Condition", "condition", &names(Condition::ALL, Condition::as_str), v.map(|v| v.condition.as_str())))
                    (text_field("Exterior color", "color_exterior", v.map(|v| v.color_exterior.as_str()), true))
                    (text_field("Interior color", "color_interior", v.and_then(|v| v.color_interior.as_deref()), false))
                    (number_field("Power (hp)", "power_hp", v.and_then(|v| v.power_hp), false))
                    (text_field("Engine", "engine", v.and_then(|v| v.engine.as_deref()), false))
                    (text_field("Drivetrain", "drivetrain", v.and_then(|v| v.drivetrain.as_deref()), false))
                    (number_field("Seats", "seats", v.and_then(|v| v.seats), false))
                    (number_field("Doors", "doors", v.and_then(|v| v.doors), false))
                }
                fieldset {
                    legend { "Presentation" }
                    label {
                        "Description"
                        textarea name="description" rows="8" required { (v.map(|v| v.description.as_str()).unwrap_or("")) }
                    }
                    label {
                        "Features (one per line)"
                        textarea name="features" rows="6" { (v.map(|v| v.features.join("\n")).unwrap_or_default()) }
                    }
                    label {
                        "Image URLs (one per line, first is the cover)"
                        textarea name="images" rows="4" { (v.map(|v| v.images.join("\n")).unwrap_or_default()) }
                    }
                    (text_field("Car-Pass URL", "car_pass_url", v.and_then(|v| v.car_pass_url.as_deref()), false))
                    label class="checkbox" {
                        input type="checkbox" name="is_featured" value="on" checked[v.is_some_and(|v| v.is_featured)];
                        "Featured on the home page"
                    }
                    (select_field("Status", "status", &names(CarStatus::ALL, CarStatus::as_str), Some(v.map(|v| v.status).unwrap_or(CarStatus::Available).as_str())))
                }
                button type="submit" class="primary" { "Save" }
                " "
                a href="/admin/cars" { "Cancel" }
            }
        },
    )
}
