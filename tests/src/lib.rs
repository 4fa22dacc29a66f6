#[cfg(test)]
mod responder;

#[cfg(test)]
mod scan;
