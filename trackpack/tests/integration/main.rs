mod golden;
mod links;
