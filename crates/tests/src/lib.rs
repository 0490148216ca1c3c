#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod role_tests;

#[cfg(test)]
mod admin_tests;

#[cfg(test)]
mod partner_tests;

#[cfg(test)]
mod customer_tests;
