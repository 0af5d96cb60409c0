use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.client.get("/health_check").dispatch().await;

    // assert
    assert_eq!(200, response.status().code);
    assert_eq!("", response.into_string().await.unwrap_or_default());
}
