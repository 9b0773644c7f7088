#![cfg(test)]

mod support;

mod resolution {
    mod integration;
}

mod routing {
    mod integration;
}

mod pipeline {
    mod integration;
}
